//! The single correction session: busy guard, captured request and overlay
//! state.
//!
//! Everything here is synchronous. The async orchestration in
//! [`crate::engine`] drives it and never holds a borrow across an await.

use crate::error::CorrectionError;
use crate::overlay::OverlayState;
use crate::surface::TextSurface;
use crate::types::{CorrectionMode, CorrectionOutcome, CorrectionRequest, RequestId, SelectionSpan};

/// Why a trigger did not start a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// A request is already in flight; the trigger is dropped.
    Busy,
    /// The trigger had no editable surface.
    NoEditableTarget,
    /// The target text was empty or whitespace.
    EmptyInput,
}

impl SkipReason {
    /// The error this skip corresponds to, if any. Both are silent.
    pub fn as_error(self) -> Option<CorrectionError> {
        match self {
            SkipReason::Busy => None,
            SkipReason::NoEditableTarget => Some(CorrectionError::NoEditableTarget),
            SkipReason::EmptyInput => Some(CorrectionError::EmptyInput),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    /// `detached` is set when the overlay was dismissed while loading: the
    /// result will be dropped on arrival.
    Busy { id: RequestId, detached: bool },
    Done,
}

/// A dispatched request together with where its result goes.
#[derive(Clone, Debug)]
struct Captured<S> {
    request: CorrectionRequest,
    surface: S,
    span: SelectionSpan,
    outcome: CorrectionOutcome,
}

/// Suggestion ready to be written back.
#[derive(Clone, Debug)]
pub struct Accepted<S> {
    pub surface: S,
    pub span: SelectionSpan,
    pub text: String,
}

/// Process-wide correction state.
#[derive(Debug)]
pub struct CorrectionSession<S> {
    active: Option<S>,
    phase: Phase,
    captured: Option<Captured<S>>,
    overlay: OverlayState,
    generation: u64,
    next_id: u64,
}

impl<S> Default for CorrectionSession<S> {
    fn default() -> Self {
        Self {
            active: None,
            phase: Phase::Idle,
            captured: None,
            overlay: OverlayState::Hidden,
            generation: 0,
            next_id: 0,
        }
    }
}

impl<S: TextSurface> CorrectionSession<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Busy { .. })
    }

    /// Id of the request currently tracked, if one is in flight.
    pub fn in_flight(&self) -> Option<RequestId> {
        match self.phase {
            Phase::Busy { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// Bumped on every overlay change; timers compare against it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active(&self) -> Option<&S> {
        self.active.as_ref()
    }

    /// Remember the most recently targeted surface (e.g. on right-click).
    pub fn set_active(&mut self, surface: S) {
        self.active = Some(surface);
    }

    /// Surface the overlay is anchored to: the captured one, else the active one.
    pub fn anchor(&self) -> Option<&S> {
        self.captured
            .as_ref()
            .map(|c| &c.surface)
            .or(self.active.as_ref())
    }

    /// Outcome of the tracked request.
    pub fn outcome(&self) -> Option<&CorrectionOutcome> {
        self.captured.as_ref().map(|c| &c.outcome)
    }

    /// Start a correction on `surface`.
    ///
    /// While busy this is a no-op: no request, no state change.
    pub fn begin(
        &mut self,
        mode: CorrectionMode,
        surface: Option<S>,
    ) -> Result<CorrectionRequest, SkipReason> {
        if self.is_busy() {
            return Err(SkipReason::Busy);
        }
        let surface = surface.ok_or(SkipReason::NoEditableTarget)?;
        self.active = Some(surface.clone());

        let span = surface.read_selection();
        if span.is_blank() {
            return Err(SkipReason::EmptyInput);
        }

        self.next_id += 1;
        let request = CorrectionRequest {
            id: RequestId(self.next_id),
            text: span.text.clone(),
            mode,
        };
        self.captured = Some(Captured {
            request: request.clone(),
            surface,
            span,
            outcome: CorrectionOutcome::Pending,
        });
        self.phase = Phase::Busy {
            id: request.id,
            detached: false,
        };
        self.show(OverlayState::Loading(mode));
        Ok(request)
    }

    /// Record the reply for request `id`.
    ///
    /// Returns the overlay generation when the overlay changed. Results for a
    /// request that is no longer tracked are dropped, as are results of a
    /// request whose overlay was dismissed while loading.
    pub fn complete(
        &mut self,
        id: RequestId,
        reply: Result<String, CorrectionError>,
    ) -> Option<u64> {
        let detached = match self.phase {
            Phase::Busy { id: tracked, detached } if tracked == id => detached,
            _ => {
                tracing::debug!(target: "fixmyspelling::engine", %id, "dropping stale result");
                return None;
            }
        };
        let captured = self.captured.as_mut()?;
        let outcome = CorrectionOutcome::from_reply(&captured.span.text, reply);
        captured.outcome = outcome.clone();
        let mode = captured.request.mode;

        if detached {
            tracing::debug!(target: "fixmyspelling::engine", %id, "overlay was dismissed, discarding result");
            self.phase = Phase::Idle;
            self.captured = None;
            return None;
        }

        self.phase = Phase::Done;
        let state = match outcome {
            CorrectionOutcome::Pending => OverlayState::Loading(mode),
            CorrectionOutcome::Result(corrected) => OverlayState::Ready { mode, corrected },
            CorrectionOutcome::Unchanged => OverlayState::Unchanged(mode),
            CorrectionOutcome::Failed(err) => OverlayState::Error(err.to_string()),
        };
        Some(self.show(state))
    }

    /// Hide the overlay. Returns whether it was visible.
    ///
    /// A loading request is detached, not aborted; a finished outcome is
    /// discarded.
    pub fn hide(&mut self) -> bool {
        let was_visible = self.overlay.is_visible();
        match self.phase {
            Phase::Busy { id, .. } => self.phase = Phase::Busy { id, detached: true },
            Phase::Done => {
                self.phase = Phase::Idle;
                self.captured = None;
            }
            Phase::Idle => {}
        }
        if was_visible {
            self.show(OverlayState::Hidden);
        }
        was_visible
    }

    /// Auto-hide timer fired. Only hides the overlay it was set for.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.hide()
    }

    /// The corrected text on a ready overlay.
    pub fn suggestion(&self) -> Option<&str> {
        match &self.overlay {
            OverlayState::Ready { corrected, .. } => Some(corrected),
            _ => None,
        }
    }

    /// Take the ready suggestion for writing back, hiding the overlay.
    pub fn take_accepted(&mut self) -> Option<Accepted<S>> {
        let text = self.suggestion()?.to_string();
        let captured = self.captured.take()?;
        self.phase = Phase::Idle;
        self.show(OverlayState::Hidden);
        Some(Accepted {
            surface: captured.surface,
            span: captured.span,
            text,
        })
    }

    fn show(&mut self, state: OverlayState) -> u64 {
        self.overlay = state;
        self.generation += 1;
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PlatformError, ServiceError};
    use crate::replace::WriteReport;
    use crate::types::{Rect, SurfaceKind, TextRange};

    #[derive(Clone, Debug, PartialEq)]
    struct Stub(&'static str, Option<TextRange>);

    impl TextSurface for Stub {
        fn kind(&self) -> SurfaceKind {
            SurfaceKind::PlainField
        }

        fn read_text(&self) -> String {
            self.0.to_string()
        }

        fn read_selection(&self) -> SelectionSpan {
            crate::surface::plain_field_span(
                self.0,
                self.1.map_or(0, |r| r.start),
                self.1.map_or(0, |r| r.end),
            )
        }

        fn write_text(&self, _: &str, _: &SelectionSpan) -> Result<WriteReport, PlatformError> {
            Ok(WriteReport::default())
        }

        fn bounding_rect(&self) -> Rect {
            Rect::default()
        }
    }

    #[test]
    fn begin_while_busy_changes_nothing() {
        let mut session = CorrectionSession::new();
        let first = session
            .begin(CorrectionMode::Spelling, Some(Stub("Helo", None)))
            .unwrap();
        let generation = session.generation();

        let second = session.begin(CorrectionMode::Improve, Some(Stub("other", None)));
        assert_eq!(second, Err(SkipReason::Busy));
        assert_eq!(session.generation(), generation);
        assert_eq!(session.in_flight(), Some(first.id));
        assert_eq!(
            *session.overlay(),
            OverlayState::Loading(CorrectionMode::Spelling)
        );
        assert_eq!(session.active(), Some(&Stub("Helo", None)));
    }

    #[test]
    fn blank_text_stays_idle() {
        let mut session = CorrectionSession::new();
        assert_eq!(
            session.begin(CorrectionMode::Spelling, Some(Stub("   ", None))),
            Err(SkipReason::EmptyInput)
        );
        assert!(!session.is_busy());
        assert_eq!(*session.overlay(), OverlayState::Hidden);
    }

    #[test]
    fn missing_surface_is_a_silent_skip() {
        let mut session = CorrectionSession::<Stub>::new();
        let reason = session.begin(CorrectionMode::Spelling, None).unwrap_err();
        assert_eq!(reason, SkipReason::NoEditableTarget);
        assert!(!reason.as_error().unwrap().is_user_visible());
    }

    #[test]
    fn stale_result_is_dropped() {
        let mut session = CorrectionSession::new();
        let first = session
            .begin(CorrectionMode::Spelling, Some(Stub("Helo", None)))
            .unwrap();
        session.complete(first.id, Ok("Hello".into()));
        session.hide();

        let second = session
            .begin(CorrectionMode::Spelling, Some(Stub("wrld", None)))
            .unwrap();
        // A duplicate delivery of the first reply must not touch the second.
        assert_eq!(session.complete(first.id, Ok("Hello".into())), None);
        assert_eq!(session.in_flight(), Some(second.id));
        assert_eq!(
            *session.overlay(),
            OverlayState::Loading(CorrectionMode::Spelling)
        );
    }

    #[test]
    fn dismiss_while_loading_detaches() {
        let mut session = CorrectionSession::new();
        let request = session
            .begin(CorrectionMode::Improve, Some(Stub("some text", None)))
            .unwrap();
        assert!(session.hide());
        assert!(session.is_busy());

        assert_eq!(session.complete(request.id, Ok("better text".into())), None);
        assert!(!session.is_busy());
        assert_eq!(*session.overlay(), OverlayState::Hidden);
    }

    #[test]
    fn identical_result_is_unchanged() {
        let mut session = CorrectionSession::new();
        let request = session
            .begin(CorrectionMode::Spelling, Some(Stub("Fine text", None)))
            .unwrap();
        session.complete(request.id, Ok("Fine text".into()));
        assert_eq!(
            *session.overlay(),
            OverlayState::Unchanged(CorrectionMode::Spelling)
        );
        assert!(matches!(session.outcome(), Some(CorrectionOutcome::Unchanged)));
    }

    #[test]
    fn stale_timer_does_not_hide_newer_overlay() {
        let mut session = CorrectionSession::new();
        let request = session
            .begin(CorrectionMode::Spelling, Some(Stub("Helo", None)))
            .unwrap();
        let error_generation = session
            .complete(request.id, Err(ServiceError::Status(500).into()))
            .unwrap();

        session
            .begin(CorrectionMode::Spelling, Some(Stub("Helo", None)))
            .unwrap();
        assert!(!session.expire(error_generation));
        assert!(session.overlay().is_visible());
    }

    #[test]
    fn accept_pairs_result_with_captured_span() {
        let mut session = CorrectionSession::new();
        let selected = Stub("abc def ghi", Some(TextRange::new(4, 7)));
        let request = session
            .begin(CorrectionMode::Improve, Some(selected.clone()))
            .unwrap();
        assert_eq!(request.text, "def");

        // Focus moves elsewhere before the user accepts.
        session.set_active(Stub("unrelated", None));
        session.complete(request.id, Ok("DEF".into()));

        let accepted = session.take_accepted().unwrap();
        assert_eq!(accepted.surface, selected);
        assert_eq!(accepted.span.range, Some(TextRange::new(4, 7)));
        assert_eq!(accepted.text, "DEF");
        assert_eq!(*session.overlay(), OverlayState::Hidden);
        assert!(session.take_accepted().is_none());
    }
}
