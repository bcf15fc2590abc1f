//! Correction request orchestrator.
//!
//! [`CorrectionEngine`] owns the single [`CorrectionSession`] of a page and
//! the platform parts needed to drive it. It is cheap to clone: every clone
//! shares the same session, which is what DOM event handlers capture.
//!
//! Session borrows are always scoped to a synchronous block. Nothing holds a
//! borrow across an `.await` or while calling into the view, since views call
//! back into the engine from their button handlers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::api::CorrectionService;
use crate::config::EngineConfig;
use crate::endpoint::{EndpointCache, derive_endpoint};
use crate::error::CorrectionError;
use crate::overlay::{OverlayAction, OverlayState};
use crate::platform::{ClipboardPlatform, OverlayView, Platform, Scheduler};
use crate::replace::WriteReport;
use crate::session::{CorrectionSession, SkipReason};
use crate::shortcut::KeyChord;
use crate::surface::TextSurface;
use crate::types::{CorrectionMode, CorrectionRequest, RequestId};

/// Everything an engine needs from its host.
pub struct EngineParts<P: Platform> {
    pub service: P::Service,
    pub store: P::Store,
    pub view: P::View,
    pub clipboard: P::Clipboard,
    pub scheduler: P::Scheduler,
    pub config: EngineConfig,
}

struct EngineInner<P: Platform> {
    parts: EngineParts<P>,
    session: RefCell<CorrectionSession<P::Surface>>,
    endpoint: EndpointCache,
}

/// Shared handle to the page's correction engine.
pub struct CorrectionEngine<P: Platform> {
    inner: Rc<EngineInner<P>>,
}

impl<P: Platform> Clone for CorrectionEngine<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Non-owning handle, for callbacks that live inside the engine's own parts.
pub struct WeakCorrectionEngine<P: Platform> {
    inner: Weak<EngineInner<P>>,
}

impl<P: Platform> Clone for WeakCorrectionEngine<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<P: Platform> WeakCorrectionEngine<P> {
    pub fn upgrade(&self) -> Option<CorrectionEngine<P>> {
        self.inner.upgrade().map(|inner| CorrectionEngine { inner })
    }
}

impl<P: Platform> CorrectionEngine<P> {
    pub fn new(parts: EngineParts<P>) -> Self {
        Self {
            inner: Rc::new(EngineInner {
                parts,
                session: RefCell::new(CorrectionSession::new()),
                endpoint: EndpointCache::new(),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakCorrectionEngine<P> {
        WeakCorrectionEngine {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.parts.config
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.inner.session.borrow().overlay().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.session.borrow().is_busy()
    }

    /// The most recently targeted surface.
    pub fn active_surface(&self) -> Option<P::Surface> {
        self.inner.session.borrow().active().cloned()
    }

    /// Remember `surface` as the target of the next trigger.
    pub fn track(&self, surface: P::Surface) {
        self.inner.session.borrow_mut().set_active(surface);
    }

    /// Mode bound to a keydown chord, if any.
    pub fn shortcut_for(&self, chord: &KeyChord) -> Option<CorrectionMode> {
        self.inner.parts.config.shortcuts.lookup(chord)
    }

    /// Start a correction and show the loading overlay.
    ///
    /// This is the synchronous half of [`Self::invoke`]: the trigger can be
    /// acknowledged before the request is sent.
    pub fn start(
        &self,
        mode: CorrectionMode,
        surface: Option<P::Surface>,
    ) -> Result<CorrectionRequest, SkipReason> {
        let started = self.inner.session.borrow_mut().begin(mode, surface);
        match &started {
            Ok(request) => {
                tracing::info!(
                    target: "fixmyspelling::engine",
                    id = %request.id,
                    %mode,
                    chars = request.text.chars().count(),
                    "correction started"
                );
                self.render();
            }
            Err(SkipReason::Busy) => {
                tracing::debug!(target: "fixmyspelling::engine", %mode, "request in flight, trigger dropped");
            }
            Err(reason) => {
                tracing::debug!(target: "fixmyspelling::engine", ?reason, "nothing to correct");
            }
        }
        started
    }

    /// Send a started request and apply its reply.
    pub async fn run(&self, request: CorrectionRequest) {
        let reply = self.fetch(&request).await;
        self.finish(request.id, reply);
    }

    /// Trigger a correction end to end.
    pub async fn invoke(
        &self,
        mode: CorrectionMode,
        surface: Option<P::Surface>,
    ) -> Result<(), SkipReason> {
        let request = self.start(mode, surface)?;
        self.run(request).await;
        Ok(())
    }

    async fn fetch(&self, request: &CorrectionRequest) -> Result<String, CorrectionError> {
        let Some(base) = self.inner.endpoint.resolve(&self.inner.parts.store).await else {
            return Err(CorrectionError::EndpointUnconfigured);
        };
        let url = derive_endpoint(&base, request.mode)?;
        Ok(self.inner.parts.service.correct(&url, request).await?)
    }

    /// Apply the reply of request `id`.
    pub fn finish(&self, id: RequestId, reply: Result<String, CorrectionError>) {
        if let Err(err) = &reply {
            tracing::warn!(
                target: "fixmyspelling::engine",
                %id,
                %err,
                cause = ?std::error::Error::source(err).map(ToString::to_string),
                "correction failed"
            );
        }
        let changed = self.inner.session.borrow_mut().complete(id, reply);
        if let Some(generation) = changed {
            self.render();
            self.schedule_auto_hide(generation);
        }
    }

    fn schedule_auto_hide(&self, generation: u64) {
        let delay = self
            .overlay_state()
            .auto_hide_after(&self.inner.parts.config.timings);
        let Some(delay) = delay else {
            return;
        };
        let weak = self.downgrade();
        self.inner.parts.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(engine) = weak.upgrade() {
                    engine.expire(generation);
                }
            }),
        );
    }

    /// Auto-hide timer for `generation` fired.
    pub fn expire(&self, generation: u64) {
        let hidden = self.inner.session.borrow_mut().expire(generation);
        if hidden {
            self.render();
        }
    }

    fn render(&self) {
        let (state, anchor) = {
            let session = self.inner.session.borrow();
            (session.overlay().clone(), session.anchor().cloned())
        };
        self.inner.parts.view.render(&state, anchor.as_ref());
    }

    /// Write the ready suggestion into the surface it was captured from.
    pub fn accept(&self) -> Option<WriteReport> {
        let accepted = self.inner.session.borrow_mut().take_accepted()?;
        self.render();
        match accepted.surface.write_text(&accepted.text, &accepted.span) {
            Ok(report) => {
                tracing::debug!(
                    target: "fixmyspelling::engine",
                    strategy = ?report.applied,
                    failures = report.failures.len(),
                    "suggestion written back"
                );
                Some(report)
            }
            Err(err) => {
                tracing::warn!(target: "fixmyspelling::engine", %err, "write back failed");
                None
            }
        }
    }

    /// Copy the ready suggestion. The overlay stays open.
    pub async fn copy(&self) {
        let (text, generation) = {
            let session = self.inner.session.borrow();
            let Some(text) = session.suggestion() else {
                return;
            };
            (text.to_string(), session.generation())
        };

        if let Err(err) = self.inner.parts.clipboard.write_text(&text).await {
            tracing::error!(target: "fixmyspelling::engine", %err, "failed to copy text");
            return;
        }

        self.inner.parts.view.set_copy_acknowledged(true);
        let weak = self.downgrade();
        self.inner.parts.scheduler.schedule(
            self.inner.parts.config.timings.copy_acknowledgment,
            Box::new(move || {
                let Some(engine) = weak.upgrade() else {
                    return;
                };
                let current = engine.inner.session.borrow().generation();
                if current == generation {
                    engine.inner.parts.view.set_copy_acknowledged(false);
                }
            }),
        );
    }

    /// Hide the overlay. Returns whether it was visible.
    pub fn dismiss(&self) -> bool {
        let hidden = self.inner.session.borrow_mut().hide();
        if hidden {
            self.render();
        }
        hidden
    }

    /// Dispatch an overlay button.
    pub async fn perform(&self, action: OverlayAction) {
        match action {
            OverlayAction::Accept => {
                self.accept();
            }
            OverlayAction::Copy => self.copy().await,
            OverlayAction::Dismiss => {
                self.dismiss();
            }
        }
    }

    /// Keep a visible overlay next to its anchor after scroll or resize.
    pub fn reposition(&self) {
        let anchor = {
            let session = self.inner.session.borrow();
            if !session.overlay().is_visible() {
                return;
            }
            session.anchor().cloned()
        };
        if let Some(anchor) = anchor {
            self.inner.parts.view.reposition(&anchor);
        }
    }

    /// The stored endpoint changed.
    pub fn endpoint_changed(&self, endpoint: Option<String>) {
        self.inner.endpoint.on_change(endpoint);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::time::Duration;

    use tokio::sync::oneshot;
    use url::Url;

    use super::*;
    use crate::api::parse_reply;
    use crate::endpoint::tests::MemoryStore;
    use crate::error::{PlatformError, ServiceError};
    use crate::replace::tests::{FakeField, FakeRegion};
    use crate::replace::{WriteStrategy, write_plain, write_rich};
    use crate::surface::{plain_field_span, utf16_slice};
    use crate::types::{Rect, SelectionSpan, SurfaceKind, TextRange};

    #[derive(Clone)]
    enum FakeSurface {
        Plain(Rc<FakeField>),
        Rich(Rc<FakeRegion>),
    }

    impl FakeSurface {
        fn plain(value: &str, selection: (usize, usize)) -> Self {
            FakeSurface::Plain(Rc::new(FakeField::new(value, selection)))
        }

        fn rich(text: &str) -> Self {
            FakeSurface::Rich(Rc::new(FakeRegion::new(text, true, true)))
        }

        fn text(&self) -> String {
            self.read_text()
        }
    }

    impl TextSurface for FakeSurface {
        fn kind(&self) -> SurfaceKind {
            match self {
                FakeSurface::Plain(_) => SurfaceKind::PlainField,
                FakeSurface::Rich(_) => SurfaceKind::RichRegion,
            }
        }

        fn read_text(&self) -> String {
            match self {
                FakeSurface::Plain(field) => field.value.borrow().clone(),
                FakeSurface::Rich(region) => region.text.borrow().clone(),
            }
        }

        fn read_selection(&self) -> SelectionSpan {
            match self {
                FakeSurface::Plain(field) => {
                    let (start, end) = field.selection.get();
                    plain_field_span(&field.value.borrow(), start, end)
                }
                FakeSurface::Rich(region) => {
                    let text = region.text.borrow();
                    match *region.selection.borrow() {
                        Some(range) if !range.is_collapsed() => {
                            SelectionSpan::selected(utf16_slice(&text, range), range)
                        }
                        _ => SelectionSpan::whole(text.as_str()),
                    }
                }
            }
        }

        fn write_text(&self, text: &str, span: &SelectionSpan) -> Result<WriteReport, PlatformError> {
            Ok(match self {
                FakeSurface::Plain(field) => write_plain(field.as_ref(), text, span),
                FakeSurface::Rich(region) => write_rich(region.as_ref(), text, span),
            })
        }

        fn bounding_rect(&self) -> Rect {
            Rect::new(40.0, 300.0, 400.0, 60.0)
        }
    }

    enum Reply {
        Now(Result<String, ServiceError>),
        Later(oneshot::Receiver<Result<String, ServiceError>>),
    }

    /// Answers with canned response bodies, parsed like the real client does.
    #[derive(Clone, Default)]
    struct FakeService {
        replies: Rc<RefCell<VecDeque<Reply>>>,
        calls: Rc<RefCell<Vec<(Url, CorrectionRequest)>>>,
    }

    impl FakeService {
        fn respond(&self, body: Result<&str, ServiceError>) {
            self.replies
                .borrow_mut()
                .push_back(Reply::Now(body.map(str::to_string)));
        }

        fn respond_later(&self) -> oneshot::Sender<Result<String, ServiceError>> {
            let (tx, rx) = oneshot::channel();
            self.replies.borrow_mut().push_back(Reply::Later(rx));
            tx
        }
    }

    impl CorrectionService for FakeService {
        async fn correct(
            &self,
            url: &Url,
            request: &CorrectionRequest,
        ) -> Result<String, ServiceError> {
            self.calls.borrow_mut().push((url.clone(), request.clone()));
            let reply = self.replies.borrow_mut().pop_front();
            let body = match reply {
                Some(Reply::Now(body)) => body?,
                Some(Reply::Later(rx)) => rx
                    .await
                    .map_err(|_| ServiceError::Transport("sender dropped".into()))??,
                None => return Err(ServiceError::Transport("no reply queued".into())),
            };
            parse_reply(request.mode, &body)
        }
    }

    #[derive(Clone, Default)]
    struct FakeView {
        renders: Rc<RefCell<Vec<OverlayState>>>,
        repositions: Rc<Cell<usize>>,
        acknowledged: Rc<RefCell<Vec<bool>>>,
    }

    impl FakeView {
        fn last(&self) -> OverlayState {
            self.renders.borrow().last().cloned().unwrap_or_default()
        }
    }

    impl OverlayView<FakeSurface> for FakeView {
        fn render(&self, state: &OverlayState, _anchor: Option<&FakeSurface>) {
            self.renders.borrow_mut().push(state.clone());
        }

        fn reposition(&self, _anchor: &FakeSurface) {
            self.repositions.set(self.repositions.get() + 1);
        }

        fn set_copy_acknowledged(&self, acknowledged: bool) {
            self.acknowledged.borrow_mut().push(acknowledged);
        }
    }

    #[derive(Clone, Default)]
    struct FakeClipboard {
        written: Rc<RefCell<Vec<String>>>,
    }

    impl ClipboardPlatform for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<(), PlatformError> {
            self.written.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    /// Timers that only fire when the test says so.
    #[derive(Clone, Default)]
    struct ManualScheduler {
        pending: Rc<RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>>,
    }

    impl ManualScheduler {
        fn delays(&self) -> Vec<Duration> {
            self.pending.borrow().iter().map(|(d, _)| *d).collect()
        }

        fn fire_all(&self) {
            let tasks = std::mem::take(&mut *self.pending.borrow_mut());
            for (_, task) in tasks {
                task();
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
            self.pending.borrow_mut().push((delay, task));
        }
    }

    struct TestPlatform;

    impl Platform for TestPlatform {
        type Surface = FakeSurface;
        type Service = FakeService;
        type Store = MemoryStore;
        type View = FakeView;
        type Clipboard = FakeClipboard;
        type Scheduler = ManualScheduler;
    }

    struct Harness {
        engine: CorrectionEngine<TestPlatform>,
        service: FakeService,
        view: FakeView,
        clipboard: FakeClipboard,
        timers: ManualScheduler,
    }

    fn harness(store: MemoryStore) -> Harness {
        let service = FakeService::default();
        let view = FakeView::default();
        let clipboard = FakeClipboard::default();
        let timers = ManualScheduler::default();
        let engine = CorrectionEngine::new(EngineParts {
            service: service.clone(),
            store,
            view: view.clone(),
            clipboard: clipboard.clone(),
            scheduler: timers.clone(),
            config: EngineConfig::default(),
        });
        Harness {
            engine,
            service,
            view,
            clipboard,
            timers,
        }
    }

    fn configured() -> Harness {
        harness(MemoryStore::with("https://api.example.com/fix-my-spelling"))
    }

    #[tokio::test]
    async fn spelling_fix_then_accept() {
        let h = configured();
        let field = FakeSurface::plain("Helo wrld", (0, 0));
        h.service.respond(Ok(r#"{"corrected":"Hello world"}"#));

        h.engine
            .invoke(CorrectionMode::Spelling, Some(field.clone()))
            .await
            .unwrap();

        {
            let calls = h.service.calls.borrow();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].0.as_str(), "https://api.example.com/fix-my-spelling");
            assert_eq!(calls[0].1.text, "Helo wrld");
        }
        assert_eq!(
            *h.view.renders.borrow(),
            vec![
                OverlayState::Loading(CorrectionMode::Spelling),
                OverlayState::Ready {
                    mode: CorrectionMode::Spelling,
                    corrected: "Hello world".into()
                },
            ]
        );

        let report = h.engine.accept().unwrap();
        assert_eq!(report.applied, Some(WriteStrategy::FieldValue));
        assert_eq!(field.text(), "Hello world");
        assert_eq!(h.view.last(), OverlayState::Hidden);
        assert!(!h.engine.is_busy());
    }

    #[tokio::test]
    async fn improve_selection_in_rich_region() {
        let h = configured();
        let region = FakeRegion::new("abc def ghi", true, true);
        *region.selection.borrow_mut() = Some(TextRange::new(4, 7));
        let surface = FakeSurface::Rich(Rc::new(region));
        h.service.respond(Ok(r#"{"improved":"DEF"}"#));

        h.engine
            .invoke(CorrectionMode::Improve, Some(surface.clone()))
            .await
            .unwrap();

        {
            let calls = h.service.calls.borrow();
            assert_eq!(
                calls[0].0.as_str(),
                "https://api.example.com/improve-this-writing"
            );
            assert_eq!(calls[0].1.text, "def");
        }

        // The caret moves before the user accepts.
        if let FakeSurface::Rich(region) = &surface {
            *region.selection.borrow_mut() = Some(TextRange::new(0, 0));
        }
        h.engine.accept().unwrap();
        assert_eq!(surface.text(), "abc DEF ghi");
    }

    #[tokio::test]
    async fn unconfigured_endpoint_shows_error_without_request() {
        let h = harness(MemoryStore::default());
        let field = FakeSurface::plain("Some text", (0, 0));

        h.engine
            .invoke(CorrectionMode::Spelling, Some(field))
            .await
            .unwrap();

        assert!(h.service.calls.borrow().is_empty());
        assert_eq!(
            h.view.last(),
            OverlayState::Error(
                "API endpoint not configured. Please set it in extension options.".into()
            )
        );
        assert_eq!(h.timers.delays(), vec![Duration::from_millis(2500)]);

        h.timers.fire_all();
        assert_eq!(h.view.last(), OverlayState::Hidden);
        assert!(!h.engine.is_busy());
    }

    #[tokio::test]
    async fn server_error_surfaces_generic_message() {
        let h = configured();
        let field = FakeSurface::plain("Some text", (0, 0));
        h.service.respond(Err(ServiceError::Status(500)));

        h.engine
            .invoke(CorrectionMode::Spelling, Some(field.clone()))
            .await
            .unwrap();

        assert_eq!(h.view.last(), OverlayState::Error("Could not connect to API".into()));
        assert!(!h.engine.overlay_state().offers_actions());
        assert!(h.engine.accept().is_none());
        assert_eq!(field.text(), "Some text");

        h.timers.fire_all();
        assert_eq!(h.view.last(), OverlayState::Hidden);
    }

    #[tokio::test]
    async fn identical_reply_auto_hides() {
        let h = configured();
        h.service.respond(Ok(r#"{"corrected":"All good"}"#));

        h.engine
            .invoke(CorrectionMode::Spelling, Some(FakeSurface::plain("All good", (0, 0))))
            .await
            .unwrap();

        assert_eq!(h.view.last(), OverlayState::Unchanged(CorrectionMode::Spelling));
        assert_eq!(h.timers.delays(), vec![Duration::from_millis(2000)]);
        h.timers.fire_all();
        assert_eq!(h.view.last(), OverlayState::Hidden);
    }

    #[tokio::test]
    async fn trigger_while_busy_is_dropped() {
        let h = configured();
        let tx = h.service.respond_later();
        let first = h
            .engine
            .start(CorrectionMode::Spelling, Some(FakeSurface::plain("Helo", (0, 0))))
            .unwrap();

        let (_, second) = tokio::join!(h.engine.run(first), async {
            let second = h
                .engine
                .start(CorrectionMode::Improve, Some(FakeSurface::plain("other", (0, 0))));
            let _ = tx.send(Ok(r#"{"corrected":"Hello"}"#.to_string()));
            second
        });

        assert_eq!(second.unwrap_err(), SkipReason::Busy);
        assert_eq!(h.service.calls.borrow().len(), 1);
        assert_eq!(
            h.view.last(),
            OverlayState::Ready {
                mode: CorrectionMode::Spelling,
                corrected: "Hello".into()
            }
        );
    }

    #[tokio::test]
    async fn dismiss_while_loading_discards_result() {
        let h = configured();
        let field = FakeSurface::plain("Helo", (0, 0));
        let tx = h.service.respond_later();
        let request = h
            .engine
            .start(CorrectionMode::Spelling, Some(field.clone()))
            .unwrap();

        tokio::join!(h.engine.run(request), async {
            assert!(h.engine.dismiss());
            let _ = tx.send(Ok(r#"{"corrected":"Hello"}"#.to_string()));
        });

        assert_eq!(h.view.last(), OverlayState::Hidden);
        assert!(!h.engine.is_busy());
        assert!(h.engine.accept().is_none());
        assert_eq!(field.text(), "Helo");
    }

    #[tokio::test]
    async fn copy_keeps_overlay_and_resets_acknowledgment() {
        let h = configured();
        h.service.respond(Ok(r#"{"corrected":"Hello"}"#));
        h.engine
            .invoke(CorrectionMode::Spelling, Some(FakeSurface::plain("Helo", (0, 0))))
            .await
            .unwrap();

        h.engine.perform(OverlayAction::Copy).await;
        assert_eq!(*h.clipboard.written.borrow(), vec!["Hello".to_string()]);
        assert!(h.engine.overlay_state().offers_actions());
        assert_eq!(h.timers.delays(), vec![Duration::from_millis(1500)]);

        h.timers.fire_all();
        assert_eq!(*h.view.acknowledged.borrow(), vec![true, false]);
    }

    #[tokio::test]
    async fn stale_auto_hide_leaves_new_overlay_alone() {
        let h = harness(MemoryStore::default());
        h.engine
            .invoke(CorrectionMode::Spelling, Some(FakeSurface::plain("text", (0, 0))))
            .await
            .unwrap();

        // A new trigger replaces the error before its timer fires.
        h.engine
            .start(CorrectionMode::Spelling, Some(FakeSurface::plain("text", (0, 0))))
            .unwrap();
        h.timers.fire_all();
        assert_eq!(h.view.last(), OverlayState::Loading(CorrectionMode::Spelling));
    }

    #[tokio::test]
    async fn blank_and_missing_targets_are_silent() {
        let h = configured();
        assert_eq!(
            h.engine.invoke(CorrectionMode::Spelling, None).await,
            Err(SkipReason::NoEditableTarget)
        );
        assert_eq!(
            h.engine
                .invoke(CorrectionMode::Spelling, Some(FakeSurface::rich("  \n ")))
                .await,
            Err(SkipReason::EmptyInput)
        );
        assert!(h.view.renders.borrow().is_empty());
        assert!(h.service.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn endpoint_change_applies_to_next_request() {
        let h = configured();
        h.service.respond(Ok(r#"{"corrected":"a"}"#));
        h.service.respond(Ok(r#"{"corrected":"b"}"#));

        h.engine
            .invoke(CorrectionMode::Spelling, Some(FakeSurface::plain("x", (0, 0))))
            .await
            .unwrap();
        h.engine.dismiss();
        h.engine
            .endpoint_changed(Some("http://localhost:8787/fix-my-spelling".into()));
        h.engine
            .invoke(CorrectionMode::Spelling, Some(FakeSurface::plain("y", (0, 0))))
            .await
            .unwrap();

        let calls = h.service.calls.borrow();
        assert_eq!(calls[1].0.as_str(), "http://localhost:8787/fix-my-spelling");
    }

    #[tokio::test]
    async fn reposition_only_when_visible() {
        let h = configured();
        h.engine.track(FakeSurface::plain("text", (0, 0)));
        h.engine.reposition();
        assert_eq!(h.view.repositions.get(), 0);

        h.service.respond(Ok(r#"{"corrected":"Text"}"#));
        let surface = h.engine.active_surface();
        h.engine
            .invoke(CorrectionMode::Spelling, surface)
            .await
            .unwrap();
        h.engine.reposition();
        assert_eq!(h.view.repositions.get(), 1);

        assert!(h.engine.dismiss());
        assert!(!h.engine.dismiss());
    }
}
