//! Platform abstraction traits for the engine.
//!
//! These traits define the interface between the correction logic and the
//! host environment (browser DOM, extension storage, timers). The browser
//! crate implements them with `web-sys`; tests implement them in memory.

use std::future::Future;
use std::time::Duration;

use crate::api::CorrectionService;
use crate::endpoint::EndpointStore;
use crate::error::PlatformError;
use crate::overlay::OverlayState;
use crate::surface::TextSurface;

/// Renders the single overlay.
pub trait OverlayView<S> {
    /// Show `state`, anchored beside `anchor`. `Hidden` hides the overlay.
    fn render(&self, state: &OverlayState, anchor: Option<&S>);

    /// Move a visible overlay after scroll or resize.
    fn reposition(&self, anchor: &S);

    /// Toggle the transient "Copied!" acknowledgment on the Copy action.
    fn set_copy_acknowledged(&self, acknowledged: bool);
}

/// Write-only system clipboard.
pub trait ClipboardPlatform {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), PlatformError>>;
}

/// Runs a task once after a delay, on the same thread.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Bundles the concrete types an engine runs against.
pub trait Platform: 'static {
    type Surface: TextSurface + 'static;
    type Service: CorrectionService + 'static;
    type Store: EndpointStore + 'static;
    type View: OverlayView<Self::Surface> + 'static;
    type Clipboard: ClipboardPlatform + 'static;
    type Scheduler: Scheduler + 'static;
}
