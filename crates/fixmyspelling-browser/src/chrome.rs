//! Bindings for the extension APIs used by the content script, background
//! worker and options page.
//!
//! web-sys doesn't expose the `chrome.*` namespace, so these are declared
//! here the same way other missing DOM interfaces are.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    // === chrome.storage ===

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "sync"], js_name = get, catch)]
    pub async fn storage_sync_get(keys: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "sync"], js_name = set, catch)]
    pub async fn storage_sync_set(items: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "sync"], js_name = remove, catch)]
    pub async fn storage_sync_remove(keys: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "onChanged"], js_name = addListener)]
    pub fn add_storage_changed_listener(listener: &Closure<dyn FnMut(JsValue, JsValue)>);

    // === chrome.runtime ===

    /// The listener returns `true` to keep `sendResponse` valid after it
    /// returns.
    #[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
    pub fn add_runtime_message_listener(
        listener: &Closure<dyn FnMut(JsValue, JsValue, js_sys::Function) -> bool>,
    );

    #[wasm_bindgen(js_namespace = ["chrome", "runtime", "onInstalled"], js_name = addListener)]
    pub fn add_installed_listener(listener: &Closure<dyn FnMut(JsValue)>);

    // === chrome.contextMenus ===

    #[wasm_bindgen(js_namespace = ["chrome", "contextMenus"], js_name = create)]
    pub fn context_menus_create(properties: &JsValue);

    #[wasm_bindgen(js_namespace = ["chrome", "contextMenus", "onClicked"], js_name = addListener)]
    pub fn add_context_menu_listener(listener: &Closure<dyn FnMut(JsValue, JsValue)>);

    // === chrome.commands ===

    #[wasm_bindgen(js_namespace = ["chrome", "commands", "onCommand"], js_name = addListener)]
    pub fn add_command_listener(listener: &Closure<dyn FnMut(String, JsValue)>);

    // === chrome.tabs ===

    #[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = sendMessage, catch)]
    pub async fn tabs_send_message(tab_id: i32, message: JsValue) -> Result<JsValue, JsValue>;
}

/// Settings object kept in `chrome.storage.sync`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(
        rename = "apiEndpoint",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub api_endpoint: Option<String>,
}

/// One entry of a `storage.onChanged` payload.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageChange {
    #[serde(default)]
    pub new_value: Option<String>,
}

/// The part of a `storage.onChanged` payload we care about.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SettingsChanges {
    #[serde(rename = "apiEndpoint", default)]
    pub api_endpoint: Option<StorageChange>,
}

/// `contextMenus.create` properties.
#[derive(Clone, Debug, Serialize)]
pub struct MenuProperties<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub contexts: &'a [&'a str],
}

/// The fields of `contextMenus.OnClickData` we read.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuClickInfo {
    pub menu_item_id: String,
}

/// The fields of `tabs.Tab` we read.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i32>,
}

impl TabInfo {
    /// Parse an optional tab argument; `undefined` yields no id.
    pub fn from_js(value: JsValue) -> Self {
        if value.is_undefined() || value.is_null() {
            return Self::default();
        }
        serde_wasm_bindgen::from_value(value).unwrap_or_default()
    }
}
