//! Browser clipboard implementation.
//!
//! Uses the async Clipboard API; no clipboard event is needed, so this works
//! from a button click in the overlay.

use fixmyspelling_core::{ClipboardPlatform, PlatformError};

/// `navigator.clipboard` writer.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClipboard;

impl ClipboardPlatform for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        let window = web_sys::window().ok_or("no window")?;
        let clipboard = window.navigator().clipboard();
        wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text))
            .await
            .map_err(|e| format!("clipboard write failed: {:?}", e))?;
        tracing::debug!(target: "fixmyspelling::overlay", "wrote {} bytes to clipboard", text.len());
        Ok(())
    }
}
