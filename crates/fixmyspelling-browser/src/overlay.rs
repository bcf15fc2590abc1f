//! DOM rendering of the suggestion overlay.
//!
//! The overlay is built once and reused. Which parts show is controlled by a
//! state class on the root element; text always goes in through
//! `textContent`.

use std::cell::RefCell;
use std::rc::Rc;

use fixmyspelling_core::{
    OverlayAction, OverlayState, OverlayView, PlatformError, TextSurface, Viewport, place_overlay,
};
use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::surface::EditableSurface;

pub const OVERLAY_ID: &str = "fixmyspelling-popup";
const STYLE_ID: &str = "fixmyspelling-styles";

const STYLES: &str = r#"
@keyframes fixmyspelling-spin {
  from { transform: rotate(0deg); }
  to { transform: rotate(360deg); }
}
@keyframes fixmyspelling-fade-in {
  from { opacity: 0; transform: translateY(8px); }
  to { opacity: 1; transform: translateY(0); }
}
#fixmyspelling-popup {
  position: absolute;
  display: none;
  background: #1f2937;
  border: 1px solid #374151;
  border-radius: 12px;
  box-shadow: 0 8px 32px rgba(0,0,0,0.3);
  z-index: 2147483647;
  font-family: system-ui, -apple-system, sans-serif;
  font-size: 14px;
  overflow: hidden;
  width: 420px;
  max-width: calc(100vw - 32px);
  animation: fixmyspelling-fade-in 0.25s ease-out;
}
#fixmyspelling-popup.fms-visible { display: block; }
#fixmyspelling-popup .fms-body { padding: 16px 20px; }
#fixmyspelling-popup .fms-status { display: flex; align-items: center; gap: 12px; }
#fixmyspelling-popup .fms-icon { display: flex; }
#fixmyspelling-popup .fms-header { display: none; align-items: center; gap: 8px; margin-bottom: 10px; color: #4ade80; }
#fixmyspelling-popup .fms-title { color: #9ca3af; font-size: 11px; text-transform: uppercase; letter-spacing: 0.5px; font-weight: 600; }
#fixmyspelling-popup .fms-message { font-size: 13px; color: #9ca3af; word-wrap: break-word; white-space: pre-wrap; }
#fixmyspelling-popup .fms-actions { display: none; border-top: 1px solid #374151; }
#fixmyspelling-popup .fms-actions button {
  flex: 1;
  padding: 14px 20px;
  border: none;
  background: transparent;
  cursor: pointer;
  font-size: 14px;
  font-weight: 600;
  transition: background 0.15s;
}
#fixmyspelling-popup .fms-actions button + button { border-left: 1px solid #374151; }
#fixmyspelling-popup .fms-accept { color: #4ade80; }
#fixmyspelling-popup .fms-accept:hover { background: rgba(74, 222, 128, 0.1); }
#fixmyspelling-popup .fms-copy { color: #60a5fa; }
#fixmyspelling-popup .fms-copy:hover { background: rgba(96, 165, 250, 0.1); }
#fixmyspelling-popup .fms-copy.fms-copied { color: #4ade80; }
#fixmyspelling-popup .fms-dismiss { color: #f87171; }
#fixmyspelling-popup .fms-dismiss:hover { background: rgba(248, 113, 113, 0.1); }
#fixmyspelling-popup.fms-loading .fms-icon { color: #6366f1; animation: fixmyspelling-spin 1s linear infinite; }
#fixmyspelling-popup.fms-ready .fms-status { display: block; }
#fixmyspelling-popup.fms-ready .fms-status > .fms-icon { display: none; }
#fixmyspelling-popup.fms-ready .fms-header { display: flex; }
#fixmyspelling-popup.fms-ready .fms-message { color: #f3f4f6; font-size: 15px; line-height: 1.5; }
#fixmyspelling-popup.fms-ready .fms-actions { display: flex; }
#fixmyspelling-popup.fms-unchanged .fms-status { color: #4ade80; }
#fixmyspelling-popup.fms-unchanged .fms-message { color: #4ade80; font-size: 14px; }
#fixmyspelling-popup.fms-error .fms-status { color: #f87171; }
#fixmyspelling-popup.fms-error .fms-message { color: #f87171; font-size: 14px; }
"#;

const ICON_SPINNER: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M21 12a9 9 0 1 1-6.219-8.56"/></svg>"#;
const ICON_CHECK: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><polyline points="20 6 9 17 4 12"/></svg>"#;
const ICON_ERROR: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="10"/><line x1="15" y1="9" x2="9" y2="15"/><line x1="9" y1="9" x2="15" y2="15"/></svg>"#;
const ICON_PEN: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M12 20h9"/><path d="M16.5 3.5a2.12 2.12 0 0 1 3 3L7 19l-4 1 1-4L16.5 3.5z"/></svg>"#;

type ActionHandler = Rc<RefCell<Option<Box<dyn Fn(OverlayAction)>>>>;

struct OverlayDom {
    root: HtmlElement,
    status_icon: HtmlElement,
    title: HtmlElement,
    message: HtmlElement,
    copy: HtmlElement,
    handler: ActionHandler,
    _listeners: Vec<EventListener>,
}

/// The page's single suggestion overlay.
#[derive(Clone)]
pub struct DomOverlay {
    inner: Rc<OverlayDom>,
}

fn create(
    document: &web_sys::Document,
    tag: &str,
    class: &str,
) -> Result<HtmlElement, PlatformError> {
    let element = document
        .create_element(tag)
        .map_err(|e| format!("create_element({tag}) failed: {:?}", e))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "created element is not HtmlElement")?;
    element.set_class_name(class);
    Ok(element)
}

fn append(parent: &HtmlElement, child: &HtmlElement) -> Result<(), PlatformError> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| format!("append_child failed: {:?}", e).into())
}

fn inject_styles(document: &web_sys::Document) -> Result<(), PlatformError> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = create(document, "style", "")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(STYLES));
    let head = document.head().ok_or("no head")?;
    head.append_child(&style)
        .map_err(|e| format!("append style failed: {:?}", e))?;
    Ok(())
}

fn current_viewport(window: &web_sys::Window) -> Viewport {
    let dimension = |v: Result<wasm_bindgen::JsValue, _>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport {
        scroll_x: window.scroll_x().unwrap_or(0.0),
        scroll_y: window.scroll_y().unwrap_or(0.0),
        width: dimension(window.inner_width()),
        height: dimension(window.inner_height()),
    }
}

impl DomOverlay {
    /// Build the overlay and attach it, hidden, to the document body.
    pub fn mount() -> Result<Self, PlatformError> {
        let document = web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;
        inject_styles(&document)?;

        let root = create(&document, "div", "")?;
        root.set_id(OVERLAY_ID);

        let body = create(&document, "div", "fms-body")?;
        let header = create(&document, "div", "fms-header")?;
        let header_icon = create(&document, "span", "fms-icon")?;
        header_icon.set_inner_html(ICON_PEN);
        let title = create(&document, "div", "fms-title")?;
        append(&header, &header_icon)?;
        append(&header, &title)?;

        let status = create(&document, "div", "fms-status")?;
        let status_icon = create(&document, "span", "fms-icon")?;
        let message = create(&document, "div", "fms-message")?;
        append(&status, &status_icon)?;
        append(&status, &message)?;
        append(&body, &header)?;
        append(&body, &status)?;

        let actions = create(&document, "div", "fms-actions")?;
        let handler: ActionHandler = Rc::new(RefCell::new(None));
        let mut listeners = Vec::with_capacity(3);
        let mut copy = None;
        for (action, class, label) in [
            (OverlayAction::Accept, "fms-accept", "Accept"),
            (OverlayAction::Copy, "fms-copy", "Copy"),
            (OverlayAction::Dismiss, "fms-dismiss", "Dismiss"),
        ] {
            let button = create(&document, "button", class)?;
            button.set_attribute("type", "button").ok();
            button.set_text_content(Some(label));
            append(&actions, &button)?;

            let handler = Rc::clone(&handler);
            listeners.push(EventListener::new(&button, "click", move |_| {
                if let Some(handle) = handler.borrow().as_ref() {
                    handle(action);
                }
            }));
            if action == OverlayAction::Copy {
                copy = Some(button);
            }
        }

        append(&root, &body)?;
        append(&root, &actions)?;
        let page_body = document.body().ok_or("no body")?;
        page_body
            .append_child(&root)
            .map_err(|e| format!("append overlay failed: {:?}", e))?;

        Ok(Self {
            inner: Rc::new(OverlayDom {
                root,
                status_icon,
                title,
                message,
                copy: copy.ok_or("copy button missing")?,
                handler,
                _listeners: listeners,
            }),
        })
    }

    /// Route button clicks to `handler`. Replaces any previous handler.
    pub fn on_action(&self, handler: impl Fn(OverlayAction) + 'static) {
        *self.inner.handler.borrow_mut() = Some(Box::new(handler));
    }

    pub fn root(&self) -> &HtmlElement {
        &self.inner.root
    }

    /// Whether `node` is part of the overlay.
    pub fn contains(&self, node: &web_sys::Node) -> bool {
        self.inner.root.contains(Some(node))
    }

    pub fn is_shown(&self) -> bool {
        self.inner.root.class_list().contains("fms-visible")
    }

    fn place(&self, anchor: &EditableSurface) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let height = f64::from(self.inner.root.offset_height());
        let placement = place_overlay(anchor.bounding_rect(), current_viewport(&window), height);
        let style = self.inner.root.style();
        let _ = style.set_property("top", &format!("{}px", placement.top));
        let _ = style.set_property("left", &format!("{}px", placement.left));
        tracing::trace!(
            target: "fixmyspelling::overlay",
            top = placement.top,
            left = placement.left,
            height,
            "placed overlay"
        );
    }
}

impl OverlayView<EditableSurface> for DomOverlay {
    fn render(&self, state: &OverlayState, anchor: Option<&EditableSurface>) {
        let dom = &self.inner;
        let (class, icon) = match state {
            OverlayState::Hidden => {
                dom.root.set_class_name("");
                return;
            }
            OverlayState::Loading(_) => ("fms-visible fms-loading", ICON_SPINNER),
            OverlayState::Ready { .. } => ("fms-visible fms-ready", ""),
            OverlayState::Unchanged(_) => ("fms-visible fms-unchanged", ICON_CHECK),
            OverlayState::Error(_) => ("fms-visible fms-error", ICON_ERROR),
        };

        dom.status_icon.set_inner_html(icon);
        let title = match state {
            OverlayState::Ready { mode, .. } => mode.title(),
            _ => "",
        };
        dom.title.set_text_content(Some(title));
        dom.message.set_text_content(state.message());
        self.set_copy_acknowledged(false);
        dom.root.set_class_name(class);

        if let Some(anchor) = anchor {
            self.place(anchor);
        }
    }

    fn reposition(&self, anchor: &EditableSurface) {
        if self.is_shown() {
            self.place(anchor);
        }
    }

    fn set_copy_acknowledged(&self, acknowledged: bool) {
        let copy = &self.inner.copy;
        let label = if acknowledged { "Copied!" } else { "Copy" };
        copy.set_text_content(Some(label));
        let _ = copy.class_list().toggle_with_force("fms-copied", acknowledged);
    }
}
