//! `chrome.storage.sync` backed endpoint store.

use fixmyspelling_core::{ENDPOINT_KEY, EndpointStore, PlatformError};
use wasm_bindgen::prelude::*;

use crate::chrome::{self, SettingsChanges, StoredSettings};

fn js_error(context: &str, err: JsValue) -> PlatformError {
    format!("{context}: {:?}", err).into()
}

fn keys() -> Result<JsValue, PlatformError> {
    serde_wasm_bindgen::to_value(&[ENDPOINT_KEY]).map_err(|e| e.to_string().into())
}

/// Endpoint persisted in the synced extension storage area.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyncStorage;

impl EndpointStore for SyncStorage {
    async fn load(&self) -> Result<Option<String>, PlatformError> {
        let result = chrome::storage_sync_get(&keys()?)
            .await
            .map_err(|e| js_error("storage.sync.get failed", e))?;
        let stored: StoredSettings =
            serde_wasm_bindgen::from_value(result).map_err(|e| PlatformError(e.to_string()))?;
        Ok(stored.api_endpoint)
    }

    async fn save(&self, endpoint: &str) -> Result<(), PlatformError> {
        let items = serde_wasm_bindgen::to_value(&StoredSettings {
            api_endpoint: Some(endpoint.to_string()),
        })
        .map_err(|e| PlatformError(e.to_string()))?;
        chrome::storage_sync_set(&items)
            .await
            .map_err(|e| js_error("storage.sync.set failed", e))?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), PlatformError> {
        chrome::storage_sync_remove(&keys()?)
            .await
            .map_err(|e| js_error("storage.sync.remove failed", e))?;
        Ok(())
    }
}

/// Call `on_change` with the new endpoint whenever the stored one changes.
///
/// The listener stays registered for the lifetime of the page.
pub fn watch_endpoint(mut on_change: impl FnMut(Option<String>) + 'static) {
    let listener = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |changes: JsValue, _area: JsValue| {
        let changes: SettingsChanges = match serde_wasm_bindgen::from_value(changes) {
            Ok(changes) => changes,
            Err(e) => {
                tracing::debug!(target: "fixmyspelling::endpoint", "unreadable storage change: {}", e);
                return;
            }
        };
        if let Some(change) = changes.api_endpoint {
            on_change(change.new_value);
        }
    });
    chrome::add_storage_changed_listener(&listener);
    listener.forget();
}
