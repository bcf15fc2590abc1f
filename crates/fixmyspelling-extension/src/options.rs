//! Options page: edit, save and clear the service endpoint.

use std::cell::RefCell;
use std::rc::Rc;

use fixmyspelling_browser::settings::{STATUS_DURATION, Status, reset_endpoint, save_endpoint};
use fixmyspelling_browser::{EndpointStore, SyncStorage};
use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

struct OptionsPage {
    input: web_sys::HtmlInputElement,
    status: web_sys::HtmlElement,
    status_timer: RefCell<Option<Timeout>>,
}

impl OptionsPage {
    /// Show `status` for a while. A newer status restarts the timer.
    fn show(&self, status: Status) {
        self.status.set_text_content(Some(&status.message));
        self.status
            .set_class_name(&format!("status {}", status.kind.class()));

        let element = self.status.clone();
        let millis = u32::try_from(STATUS_DURATION.as_millis()).unwrap_or(u32::MAX);
        let timer = Timeout::new(millis, move || element.set_class_name("status"));
        // Dropping the previous timeout cancels it.
        *self.status_timer.borrow_mut() = Some(timer);
    }
}

fn element<T: JsCast>(document: &web_sys::Document, id: &str) -> Result<T, JsError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsError::new(&format!("#{id} missing")))?
        .dyn_into::<T>()
        .map_err(|_| JsError::new(&format!("#{id} has the wrong element type")))
}

#[wasm_bindgen(js_name = startOptionsPage)]
pub fn start_options_page() -> Result<(), JsError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsError::new("no document"))?;

    let page = Rc::new(OptionsPage {
        input: element(&document, "apiEndpoint")?,
        status: element(&document, "status")?,
        status_timer: RefCell::new(None),
    });
    let save_button: web_sys::HtmlElement = element(&document, "saveBtn")?;
    let reset_button: web_sys::HtmlElement = element(&document, "resetBtn")?;

    let loading = Rc::clone(&page);
    wasm_bindgen_futures::spawn_local(async move {
        match SyncStorage.load().await {
            Ok(Some(endpoint)) => loading.input.set_value(&endpoint),
            Ok(None) => {}
            Err(err) => tracing::warn!(target: "fixmyspelling::endpoint", %err, "could not load settings"),
        }
    });

    let saving = Rc::clone(&page);
    EventListener::new(&save_button, "click", move |_| {
        let page = Rc::clone(&saving);
        wasm_bindgen_futures::spawn_local(async move {
            let status = save_endpoint(&SyncStorage, &page.input.value()).await;
            page.show(status);
        });
    })
    .forget();

    let resetting = Rc::clone(&page);
    EventListener::new(&reset_button, "click", move |_| {
        let page = Rc::clone(&resetting);
        page.input.set_value("");
        wasm_bindgen_futures::spawn_local(async move {
            let status = reset_endpoint(&SyncStorage).await;
            page.show(status);
        });
    })
    .forget();

    Ok(())
}
