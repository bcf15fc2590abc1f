//! In-page keyboard shortcuts.
//!
//! A shortcut is a letter plus modifiers. `Mod` means "Ctrl or Cmd", so the
//! same binding works on every platform.

use std::fmt;
use std::str::FromStr;

use crate::types::CorrectionMode;

/// Modifier and key state of a keydown event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl KeyChord {
    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }
}

/// A modifier+letter combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shortcut {
    pub letter: char,
    pub shift: bool,
    pub alt: bool,
}

impl Shortcut {
    pub const fn new(letter: char, shift: bool) -> Self {
        Self {
            letter,
            shift,
            alt: false,
        }
    }

    /// Letter comparison ignores case: with Shift held browsers report `F`.
    pub fn matches(&self, chord: &KeyChord) -> bool {
        let mut chars = chord.key.chars();
        let (Some(key), None) = (chars.next(), chars.next()) else {
            return false;
        };
        key.eq_ignore_ascii_case(&self.letter)
            && (chord.ctrl || chord.meta)
            && chord.shift == self.shift
            && chord.alt == self.alt
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mod+")?;
        if self.shift {
            f.write_str("Shift+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        write!(f, "{}", self.letter.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid shortcut {0:?}: expected e.g. \"Mod+Shift+F\"")]
pub struct ShortcutParseError(pub String);

impl FromStr for Shortcut {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ShortcutParseError(s.to_string());
        let mut has_mod = false;
        let mut shift = false;
        let mut alt = false;
        let mut letter = None;

        for part in s.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "mod" | "ctrl" | "cmd" | "meta" | "command" | "control" => has_mod = true,
                "shift" => shift = true,
                "alt" | "option" => alt = true,
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next(), letter) {
                        (Some(c), None, None) if c.is_ascii_alphanumeric() => letter = Some(c),
                        _ => return Err(err()),
                    }
                }
            }
        }

        match (has_mod, letter) {
            (true, Some(letter)) => Ok(Shortcut { letter, shift, alt }),
            _ => Err(err()),
        }
    }
}

/// Shortcut bindings per mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortcutMap {
    pub spelling: Shortcut,
    pub improve: Shortcut,
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self {
            spelling: Shortcut::new('f', true),
            improve: Shortcut::new('i', true),
        }
    }
}

impl ShortcutMap {
    /// Mode bound to `chord`, if any.
    pub fn lookup(&self, chord: &KeyChord) -> Option<CorrectionMode> {
        if self.spelling.matches(chord) {
            Some(CorrectionMode::Spelling)
        } else if self.improve.matches(chord) {
            Some(CorrectionMode::Improve)
        } else {
            None
        }
    }
}
