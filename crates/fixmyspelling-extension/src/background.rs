//! Background worker: context menu entries and extension commands, relayed
//! to the active tab's content script.

use fixmyspelling_browser::chrome::{self, MenuClickInfo, MenuProperties, TabInfo};
use fixmyspelling_browser::trigger::{MENU_ITEMS, action_for_command, action_for_menu_item};
use fixmyspelling_browser::{TriggerAction, TriggerMessage, TriggerResponse};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = startBackground)]
pub fn start_background() {
    let installed = Closure::<dyn FnMut(JsValue)>::new(|_details: JsValue| register_menus());
    chrome::add_installed_listener(&installed);
    installed.forget();

    let clicked = Closure::<dyn FnMut(JsValue, JsValue)>::new(|info: JsValue, tab: JsValue| {
        let info: MenuClickInfo = match serde_wasm_bindgen::from_value(info) {
            Ok(info) => info,
            Err(e) => {
                tracing::debug!(target: "fixmyspelling::background", "unreadable menu click: {}", e);
                return;
            }
        };
        if let Some(action) = action_for_menu_item(&info.menu_item_id) {
            relay(TabInfo::from_js(tab), action);
        }
    });
    chrome::add_context_menu_listener(&clicked);
    clicked.forget();

    let command = Closure::<dyn FnMut(String, JsValue)>::new(|command: String, tab: JsValue| {
        match action_for_command(&command) {
            Some(action) => relay(TabInfo::from_js(tab), action),
            None => tracing::debug!(target: "fixmyspelling::background", %command, "unknown command"),
        }
    });
    chrome::add_command_listener(&command);
    command.forget();
}

fn register_menus() {
    for item in MENU_ITEMS {
        let properties = MenuProperties {
            id: item.id,
            title: item.title,
            contexts: &["editable"],
        };
        match serde_wasm_bindgen::to_value(&properties) {
            Ok(properties) => chrome::context_menus_create(&properties),
            Err(e) => tracing::warn!(target: "fixmyspelling::background", id = item.id, "menu properties: {}", e),
        }
    }
}

fn relay(tab: TabInfo, action: TriggerAction) {
    let Some(tab_id) = tab.id else {
        tracing::debug!(target: "fixmyspelling::background", ?action, "trigger without a tab");
        return;
    };
    let message = match serde_wasm_bindgen::to_value(&TriggerMessage::new(action)) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(target: "fixmyspelling::background", "could not encode trigger: {}", e);
            return;
        }
    };

    wasm_bindgen_futures::spawn_local(async move {
        match chrome::tabs_send_message(tab_id, message).await {
            Ok(reply) => {
                let reply = serde_wasm_bindgen::from_value::<TriggerResponse>(reply);
                if let Ok(TriggerResponse {
                    success: false,
                    error,
                }) = reply
                {
                    tracing::debug!(target: "fixmyspelling::background", tab_id, ?error, "trigger not applied");
                }
            }
            // No content script in this tab (e.g. a browser page).
            Err(e) => tracing::debug!(target: "fixmyspelling::background", tab_id, "sendMessage failed: {:?}", e),
        }
    });
}
