//! Editable-surface classification and the surface abstraction.
//!
//! Classification is a pure function of a handful of element traits, so the
//! browser layer only has to read those traits off a DOM node. The ancestor
//! walk is generic over [`ElementNode`] so it can be exercised without a DOM.

use crate::error::PlatformError;
use crate::replace::WriteReport;
use crate::types::{Rect, SelectionSpan, SurfaceKind, TextRange};

/// `<input type=…>` values that count as plain text fields. `None` is the
/// missing attribute.
pub const PLAIN_INPUT_TYPES: &[&str] = &["text", "search", "email", "url"];

/// The element properties classification depends on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementTraits {
    /// Lowercase tag name.
    pub tag: String,
    /// Raw `type` attribute, for `<input>`.
    pub input_type: Option<String>,
    /// The element's computed `isContentEditable`.
    pub is_content_editable: bool,
    /// Raw `contenteditable` attribute.
    pub contenteditable_attr: Option<String>,
    /// Raw `role` attribute.
    pub role: Option<String>,
}

impl ElementTraits {
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_input_type(mut self, ty: &str) -> Self {
        self.input_type = Some(ty.to_string());
        self
    }

    pub fn with_content_editable(mut self, editable: bool) -> Self {
        self.is_content_editable = editable;
        self
    }

    pub fn with_contenteditable_attr(mut self, value: &str) -> Self {
        self.contenteditable_attr = Some(value.to_string());
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    /// Native text control with an allowed type.
    pub fn is_plain_field(&self) -> bool {
        match self.tag.as_str() {
            "textarea" => true,
            "input" => match self.input_type.as_deref().map(str::trim) {
                None | Some("") => true,
                Some(ty) => PLAIN_INPUT_TYPES
                    .iter()
                    .any(|allowed| ty.eq_ignore_ascii_case(allowed)),
            },
            _ => false,
        }
    }

    /// Exposes an editable-content capability.
    pub fn is_rich_region(&self) -> bool {
        self.is_content_editable
            || self
                .contenteditable_attr
                .as_deref()
                .is_some_and(|v| v.eq_ignore_ascii_case("true"))
            || self
                .role
                .as_deref()
                .is_some_and(|r| r.eq_ignore_ascii_case("textbox"))
    }
}

/// Classify a single element, without looking at ancestors.
pub fn classify(traits: &ElementTraits) -> Option<SurfaceKind> {
    if traits.is_plain_field() {
        Some(SurfaceKind::PlainField)
    } else if traits.is_rich_region() {
        Some(SurfaceKind::RichRegion)
    } else {
        None
    }
}

/// A node in a tree that can be walked upwards.
pub trait ElementNode: Sized {
    fn traits(&self) -> ElementTraits;
    fn parent(&self) -> Option<Self>;
}

/// Resolve the editable surface for an event target.
///
/// Walks from `node` upwards to the first element that classifies. For rich
/// regions the walk continues while the parent is also a rich region, so a
/// click on a `<span>` inside an editor resolves to the editing root rather
/// than the span.
pub fn resolve_editable<N: ElementNode>(node: N) -> Option<(N, SurfaceKind)> {
    let mut current = Some(node);
    while let Some(candidate) = current {
        match classify(&candidate.traits()) {
            Some(SurfaceKind::PlainField) => return Some((candidate, SurfaceKind::PlainField)),
            Some(SurfaceKind::RichRegion) => {
                return Some((editing_root(candidate), SurfaceKind::RichRegion));
            }
            None => current = candidate.parent(),
        }
    }
    None
}

fn editing_root<N: ElementNode>(mut node: N) -> N {
    loop {
        match node.parent() {
            Some(parent) if parent.traits().is_rich_region() => node = parent,
            _ => return node,
        }
    }
}

/// An editable surface the engine can read from and write back into.
///
/// Implementations dispatch on [`SurfaceKind`]; the engine never probes for
/// capabilities once a surface has been classified.
pub trait TextSurface: Clone {
    fn kind(&self) -> SurfaceKind;

    /// Current full text (field value, or rendered text of a region).
    fn read_text(&self) -> String;

    /// Current selection, or the whole text if nothing is selected.
    fn read_selection(&self) -> SelectionSpan;

    /// Write `text` back, replacing `span`'s range if it has one and the
    /// whole content otherwise.
    fn write_text(&self, text: &str, span: &SelectionSpan) -> Result<WriteReport, PlatformError>;

    /// Viewport-relative bounding box, for anchoring the overlay.
    fn bounding_rect(&self) -> Rect;
}

/// Number of UTF-16 code units in `s`.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Byte index for a UTF-16 offset, clamped to the string length.
///
/// An offset landing inside a surrogate pair rounds down to the character start.
pub fn utf16_to_byte(s: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (byte_idx, ch) in s.char_indices() {
        let next = units + ch.len_utf16();
        if next > utf16_offset {
            return byte_idx;
        }
        units = next;
    }
    s.len()
}

/// Substring between two UTF-16 offsets.
pub fn utf16_slice(s: &str, range: TextRange) -> &str {
    let start = utf16_to_byte(s, range.start);
    let end = utf16_to_byte(s, range.end).max(start);
    &s[start..end]
}

/// Replace `range` in `value` with `replacement`, keeping prefix and suffix
/// verbatim. Offsets past the end are clamped.
pub fn splice_utf16(value: &str, range: TextRange, replacement: &str) -> String {
    let start = utf16_to_byte(value, range.start);
    let end = utf16_to_byte(value, range.end).max(start);
    let mut out = String::with_capacity(value.len() - (end - start) + replacement.len());
    out.push_str(&value[..start]);
    out.push_str(replacement);
    out.push_str(&value[end..]);
    out
}

/// Selection span for a plain field given its value and selection offsets.
///
/// A zero-length selection means "no selection": the span covers the value.
pub fn plain_field_span(value: &str, start: usize, end: usize) -> SelectionSpan {
    let range = TextRange::new(start, end);
    if range.is_collapsed() {
        SelectionSpan::whole(value)
    } else {
        SelectionSpan::selected(utf16_slice(value, range), range)
    }
}
