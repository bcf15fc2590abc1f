//! The browser platform bundle.

use fixmyspelling_core::{
    CorrectionEngine, EngineConfig, EngineParts, HttpCorrectionService, Platform,
};

use crate::clipboard::BrowserClipboard;
use crate::overlay::DomOverlay;
use crate::storage::SyncStorage;
use crate::surface::EditableSurface;
use crate::timer::TimeoutScheduler;

/// Concrete types the content script runs the engine with.
pub struct BrowserPlatform;

impl Platform for BrowserPlatform {
    type Surface = EditableSurface;
    type Service = HttpCorrectionService;
    type Store = SyncStorage;
    type View = DomOverlay;
    type Clipboard = BrowserClipboard;
    type Scheduler = TimeoutScheduler;
}

pub type BrowserEngine = CorrectionEngine<BrowserPlatform>;

/// Build an engine that renders into `overlay` and routes its buttons back.
pub fn browser_engine(overlay: DomOverlay, config: EngineConfig) -> BrowserEngine {
    let engine = CorrectionEngine::new(EngineParts {
        service: HttpCorrectionService::new(),
        store: SyncStorage,
        view: overlay.clone(),
        clipboard: BrowserClipboard,
        scheduler: TimeoutScheduler,
        config,
    });

    let weak = engine.downgrade();
    overlay.on_action(move |action| {
        let Some(engine) = weak.upgrade() else {
            return;
        };
        tracing::debug!(target: "fixmyspelling::overlay", ?action, "overlay action");
        wasm_bindgen_futures::spawn_local(async move { engine.perform(action).await });
    });
    engine
}
