//! Content script: one engine per page.

use std::cell::RefCell;

use fixmyspelling_browser::chrome;
use fixmyspelling_browser::{
    BrowserEngine, BrowserPlatform, DomOverlay, EngineConfig, PageListeners, TriggerMessage,
    WeakCorrectionEngine, browser_engine, message_target, trigger, watch_endpoint,
};
use wasm_bindgen::prelude::*;

struct ContentScript {
    _engine: BrowserEngine,
    _listeners: PageListeners,
}

thread_local! {
    static CONTENT: RefCell<Option<ContentScript>> = const { RefCell::new(None) };
}

/// Mount the overlay and start listening for triggers. Idempotent.
#[wasm_bindgen(js_name = startContentScript)]
pub fn start_content_script() -> Result<(), JsError> {
    if CONTENT.with(|c| c.borrow().is_some()) {
        return Ok(());
    }

    let overlay = DomOverlay::mount().map_err(|e| JsError::new(&e.to_string()))?;
    let engine = browser_engine(overlay.clone(), EngineConfig::default());
    let listeners = PageListeners::install(&engine, &overlay)
        .ok_or_else(|| JsError::new("no window to attach listeners to"))?;

    let weak = engine.downgrade();
    watch_endpoint(move |endpoint| {
        if let Some(engine) = weak.upgrade() {
            engine.endpoint_changed(endpoint);
        }
    });
    listen_for_triggers(engine.downgrade());

    tracing::info!(target: "fixmyspelling::engine", "content script ready");
    CONTENT.with(|c| {
        *c.borrow_mut() = Some(ContentScript {
            _engine: engine,
            _listeners: listeners,
        })
    });
    Ok(())
}

/// Answer `{ action }` messages from the background worker.
///
/// The target comes from [`message_target`]. The response is sent before the
/// request completes.
fn listen_for_triggers(weak: WeakCorrectionEngine<BrowserPlatform>) {
    let listener = Closure::<dyn FnMut(JsValue, JsValue, js_sys::Function) -> bool>::new(
        move |message: JsValue, _sender: JsValue, send_response: js_sys::Function| {
            let Ok(message) = serde_wasm_bindgen::from_value::<TriggerMessage>(message) else {
                return false;
            };
            let Some(engine) = weak.upgrade() else {
                return false;
            };

            let surface = message_target(&engine);
            let response = trigger(&engine, message.action.mode(), surface);
            match serde_wasm_bindgen::to_value(&response) {
                Ok(value) => {
                    if let Err(e) = send_response.call1(&JsValue::NULL, &value) {
                        tracing::debug!(target: "fixmyspelling::engine", "sendResponse failed: {:?}", e);
                    }
                }
                Err(e) => tracing::warn!(target: "fixmyspelling::engine", "could not encode response: {}", e),
            }
            true
        },
    );
    chrome::add_runtime_message_listener(&listener);
    listener.forget();
}
