//! Core data model: correction modes, surface kinds, captured selections and
//! request outcomes.
//!
//! These types are framework-agnostic. Offsets are UTF-16 code units, which is
//! what both `selectionStart`/`selectionEnd` and DOM text node offsets use.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CorrectionError;

/// Which remote operation to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionMode {
    /// Fix spelling and grammar.
    Spelling,
    /// Rewrite for clarity.
    Improve,
}

impl CorrectionMode {
    /// Final path segment of the service resource for this mode.
    pub fn resource(self) -> &'static str {
        match self {
            CorrectionMode::Spelling => "fix-my-spelling",
            CorrectionMode::Improve => "improve-this-writing",
        }
    }

    /// Message shown while the request is in flight.
    pub fn loading_message(self) -> &'static str {
        match self {
            CorrectionMode::Spelling => "Checking spelling...",
            CorrectionMode::Improve => "Improving writing...",
        }
    }

    /// Heading of the suggestion panel.
    pub fn title(self) -> &'static str {
        match self {
            CorrectionMode::Spelling => "Spelling Fixed",
            CorrectionMode::Improve => "Improved Writing",
        }
    }

    /// Informational message when the service returned the text unchanged.
    pub fn unchanged_message(self) -> &'static str {
        match self {
            CorrectionMode::Spelling => "No spelling issues found",
            CorrectionMode::Improve => "No changes suggested",
        }
    }
}

impl fmt::Display for CorrectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectionMode::Spelling => f.write_str("spelling"),
            CorrectionMode::Improve => f.write_str("improve"),
        }
    }
}

/// The two structurally different editable surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Native `<input>` or `<textarea>` with a value and selection offsets.
    PlainField,
    /// Element whose content is directly editable (`contenteditable`, `role=textbox`).
    RichRegion,
}

/// Half-open `[start, end)` range in UTF-16 code units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Create an ordered range from two offsets in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// The text an operation targets, captured at request time.
///
/// When `range` is present the operation targets a substring; otherwise the
/// whole field. The span itself is replayed on accept, not the live cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSpan {
    pub text: String,
    pub range: Option<TextRange>,
}

impl SelectionSpan {
    /// Span covering the full content of a surface.
    pub fn whole(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            range: None,
        }
    }

    /// Span covering a selected substring.
    pub fn selected(text: impl Into<String>, range: TextRange) -> Self {
        Self {
            text: text.into(),
            range: Some(range),
        }
    }

    pub fn has_selection(&self) -> bool {
        self.range.is_some()
    }

    /// True when there is nothing worth sending.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Identifies one dispatched request so late results can be matched or dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Immutable once dispatched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrectionRequest {
    pub id: RequestId,
    pub text: String,
    pub mode: CorrectionMode,
}

/// Terminal (or pending) result of one correction request.
#[derive(Clone, Debug)]
pub enum CorrectionOutcome {
    Pending,
    Result(String),
    Unchanged,
    Failed(CorrectionError),
}

impl CorrectionOutcome {
    /// Map a service reply against the text that was sent.
    ///
    /// An exact string match is `Unchanged`, never `Result`.
    pub fn from_reply(original: &str, reply: Result<String, CorrectionError>) -> Self {
        match reply {
            Ok(corrected) if corrected == original => CorrectionOutcome::Unchanged,
            Ok(corrected) => CorrectionOutcome::Result(corrected),
            Err(err) => CorrectionOutcome::Failed(err),
        }
    }
}

/// Viewport-relative bounding box of a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Scroll offsets and inner size of the window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_reply_is_unchanged() {
        let outcome = CorrectionOutcome::from_reply("Hello", Ok("Hello".to_string()));
        assert!(matches!(outcome, CorrectionOutcome::Unchanged));
    }

    #[test]
    fn whitespace_difference_is_a_result() {
        let outcome = CorrectionOutcome::from_reply("Hello", Ok("Hello ".to_string()));
        match outcome {
            CorrectionOutcome::Result(text) => assert_eq!(text, "Hello "),
            other => panic!("expected result, got {other:?}"),
        }
    }

    #[test]
    fn text_range_orders_offsets() {
        let range = TextRange::new(9, 4);
        assert_eq!(range, TextRange { start: 4, end: 9 });
        assert!(!range.is_collapsed());
    }

    #[test]
    fn blank_span_detection() {
        assert!(SelectionSpan::whole("  \n\t").is_blank());
        assert!(!SelectionSpan::whole(" a ").is_blank());
    }

    #[test]
    fn mode_resources() {
        assert_eq!(CorrectionMode::Spelling.resource(), "fix-my-spelling");
        assert_eq!(CorrectionMode::Improve.resource(), "improve-this-writing");
    }
}
