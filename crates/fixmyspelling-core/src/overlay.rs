//! Suggestion overlay state and placement.
//!
//! Exactly one overlay exists per page. What it shows is derived from the
//! current [`OverlayState`]; the rendering itself lives in the platform layer.

use std::time::Duration;

use crate::types::{CorrectionMode, Rect, Viewport};

/// Overlay width in CSS pixels.
pub const OVERLAY_WIDTH: f64 = 420.0;
/// Minimum distance between the overlay and the viewport edges.
pub const VIEWPORT_MARGIN: f64 = 16.0;
/// Gap between the overlay and the anchored surface.
pub const ANCHOR_GAP: f64 = 8.0;

/// What the overlay currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OverlayState {
    #[default]
    Hidden,
    Loading(CorrectionMode),
    Ready {
        mode: CorrectionMode,
        corrected: String,
    },
    Unchanged(CorrectionMode),
    Error(String),
}

impl OverlayState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, OverlayState::Hidden)
    }

    /// Accept/Copy are only offered on a ready suggestion.
    pub fn offers_actions(&self) -> bool {
        matches!(self, OverlayState::Ready { .. })
    }

    /// Delay after which an informational state hides itself.
    pub fn auto_hide_after(&self, timings: &OverlayTimings) -> Option<Duration> {
        match self {
            OverlayState::Unchanged(_) => Some(timings.unchanged),
            OverlayState::Error(_) => Some(timings.error),
            _ => None,
        }
    }

    /// Primary line of text for the state, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            OverlayState::Hidden => None,
            OverlayState::Loading(mode) => Some(mode.loading_message()),
            OverlayState::Ready { corrected, .. } => Some(corrected),
            OverlayState::Unchanged(mode) => Some(mode.unchanged_message()),
            OverlayState::Error(message) => Some(message),
        }
    }
}

/// User choices on a ready suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayAction {
    Accept,
    Copy,
    Dismiss,
}

/// Fixed delays of the overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayTimings {
    pub unchanged: Duration,
    pub error: Duration,
    pub copy_acknowledgment: Duration,
}

impl Default for OverlayTimings {
    fn default() -> Self {
        Self {
            unchanged: Duration::from_millis(2000),
            error: Duration::from_millis(2500),
            copy_acknowledgment: Duration::from_millis(1500),
        }
    }
}

/// Document-relative position of the overlay's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
}

/// Place the overlay beside `anchor`.
///
/// Prefers above the anchor; falls back to below when above would overflow
/// the top of the viewport. Horizontally the overlay starts at the anchor's
/// left edge, clamped so it stays within the viewport margins.
pub fn place_overlay(anchor: Rect, viewport: Viewport, overlay_height: f64) -> Placement {
    let width = OVERLAY_WIDTH.min(viewport.width - 2.0 * VIEWPORT_MARGIN).max(0.0);

    let max_left = viewport.width - width - VIEWPORT_MARGIN;
    let left = anchor.left.min(max_left).max(VIEWPORT_MARGIN);

    let above = anchor.top - overlay_height - ANCHOR_GAP;
    let top = if above < ANCHOR_GAP {
        anchor.bottom() + ANCHOR_GAP
    } else {
        above
    };

    Placement {
        top: viewport.scroll_y + top,
        left: viewport.scroll_x + left,
    }
}
