//! Browser implementation of editable surfaces.
//!
//! Plain fields are `<input>` and `<textarea>` elements and are driven
//! through their value and selection offsets. Rich regions are
//! contenteditable elements and are driven through the window selection and
//! the document's editing commands.

use fixmyspelling_core::surface::plain_field_span;
use fixmyspelling_core::{
    ElementNode, ElementTraits, PlainFieldOps, PlatformError, Rect, RichRegionOps, SelectionSpan,
    SurfaceKind, TextRange, TextSurface, WriteReport, classify, resolve_editable, write_plain,
    write_rich,
};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::offsets::{boundary_to_offset, find_text_node_at_offset};

/// Element wrapper for the ancestor walk.
struct DomElement(web_sys::Element);

impl ElementNode for DomElement {
    fn traits(&self) -> ElementTraits {
        let element = &self.0;
        let mut traits = ElementTraits::tag(&element.tag_name());
        // The `type` property, not the attribute: unknown types read as "text".
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            traits.input_type = Some(input.type_());
        }
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            traits.is_content_editable = html.is_content_editable();
        }
        traits.contenteditable_attr = element.get_attribute("contenteditable");
        traits.role = element.get_attribute("role");
        traits
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(DomElement)
    }
}

/// Whether `element` itself (not an ancestor) is editable.
pub fn is_editable_element(element: &web_sys::Element) -> bool {
    classify(&DomElement(element.clone()).traits()).is_some()
}

fn document() -> Result<web_sys::Document, PlatformError> {
    web_sys::window()
        .ok_or("no window")?
        .document()
        .ok_or_else(|| "no document".into())
}

fn dispatch(target: &web_sys::EventTarget, event: &web_sys::Event) {
    if let Err(e) = target.dispatch_event(event) {
        tracing::debug!(target: "fixmyspelling::surface", "dispatch {} failed: {:?}", event.type_(), e);
    }
}

fn dispatch_bubbling(target: &web_sys::EventTarget, event_type: &str) {
    let init = web_sys::EventInit::new();
    init.set_bubbles(true);
    match web_sys::Event::new_with_event_init_dict(event_type, &init) {
        Ok(event) => dispatch(target, &event),
        Err(e) => tracing::debug!(target: "fixmyspelling::surface", "create {} event failed: {:?}", event_type, e),
    }
}

/// A native single- or multi-line text control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlainField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl PlainField {
    fn from_element(element: web_sys::Element) -> Option<Self> {
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Some(PlainField::Input(input)),
            Err(element) => element
                .dyn_into::<HtmlTextAreaElement>()
                .ok()
                .map(PlainField::TextArea),
        }
    }

    pub fn element(&self) -> &HtmlElement {
        match self {
            PlainField::Input(input) => input.as_ref(),
            PlainField::TextArea(area) => area.as_ref(),
        }
    }

    /// `selectionStart`/`selectionEnd`, 0 when unavailable.
    pub fn selection_offsets(&self) -> (usize, usize) {
        let (start, end) = match self {
            PlainField::Input(input) => (input.selection_start(), input.selection_end()),
            PlainField::TextArea(area) => (area.selection_start(), area.selection_end()),
        };
        let offset = |r: Result<Option<u32>, _>| r.ok().flatten().unwrap_or(0) as usize;
        (offset(start), offset(end))
    }
}

impl PlainFieldOps for PlainField {
    fn value(&self) -> String {
        match self {
            PlainField::Input(input) => input.value(),
            PlainField::TextArea(area) => area.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            PlainField::Input(input) => input.set_value(value),
            PlainField::TextArea(area) => area.set_value(value),
        }
    }

    fn notify_input(&self) {
        dispatch_bubbling(self.element(), "input");
    }
}

/// A contenteditable element (the editing root, not a descendant).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RichRegion {
    element: HtmlElement,
}

impl RichRegion {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn root(&self) -> &web_sys::Node {
        self.element.as_ref()
    }

    fn window_selection() -> Result<web_sys::Selection, PlatformError> {
        web_sys::window()
            .ok_or("no window")?
            .get_selection()
            .map_err(|e| format!("get_selection failed: {:?}", e))?
            .ok_or_else(|| "no selection object".into())
    }

    fn apply_range(range: &web_sys::Range) -> Result<(), PlatformError> {
        let selection = Self::window_selection()?;
        selection
            .remove_all_ranges()
            .map_err(|e| format!("remove_all_ranges failed: {:?}", e))?;
        selection
            .add_range(range)
            .map_err(|e| format!("add_range failed: {:?}", e))?;
        Ok(())
    }

    /// The live selection, if it is non-blank and lies inside this region.
    fn captured_selection(&self) -> Option<SelectionSpan> {
        let selection = Self::window_selection().ok()?;
        let text = String::from(selection.to_string());
        if text.trim().is_empty() || selection.range_count() == 0 {
            return None;
        }
        let range = selection.get_range_at(0).ok()?;
        let start_node = range.start_container().ok()?;
        let end_node = range.end_container().ok()?;
        if !self.root().contains(Some(&start_node)) || !self.root().contains(Some(&end_node)) {
            tracing::trace!(target: "fixmyspelling::surface", "selection lies outside the region");
            return None;
        }
        let start = boundary_to_offset(self.root(), &start_node, range.start_offset().ok()?).ok()?;
        let end = boundary_to_offset(self.root(), &end_node, range.end_offset().ok()?).ok()?;
        Some(SelectionSpan::selected(text, TextRange::new(start, end)))
    }

    fn rendered_text(&self) -> String {
        let text = self.element.inner_text();
        if text.is_empty() {
            self.root().text_content().unwrap_or_default()
        } else {
            text
        }
    }
}

impl RichRegionOps for RichRegion {
    fn focus(&self) {
        if let Err(e) = self.element.focus() {
            tracing::debug!(target: "fixmyspelling::surface", "focus failed: {:?}", e);
        }
    }

    fn select_contents(&self) -> Result<(), PlatformError> {
        let range = document()?
            .create_range()
            .map_err(|e| format!("create_range failed: {:?}", e))?;
        range
            .select_node_contents(self.root())
            .map_err(|e| format!("select_node_contents failed: {:?}", e))?;
        Self::apply_range(&range)
    }

    fn select_range(&self, captured: TextRange) -> Result<(), PlatformError> {
        let range = document()?
            .create_range()
            .map_err(|e| format!("create_range failed: {:?}", e))?;
        let (start_node, start_offset) = find_text_node_at_offset(self.root(), captured.start)?;
        let (end_node, end_offset) = find_text_node_at_offset(self.root(), captured.end)?;
        range
            .set_start(&start_node, start_offset as u32)
            .map_err(|e| format!("set_start failed: {:?}", e))?;
        range
            .set_end(&end_node, end_offset as u32)
            .map_err(|e| format!("set_end failed: {:?}", e))?;
        Self::apply_range(&range)
    }

    fn insert_text_command(&self, text: &str) -> bool {
        let Ok(document) = document() else {
            return false;
        };
        let Ok(html_document) = document.dyn_into::<web_sys::HtmlDocument>() else {
            return false;
        };
        html_document
            .exec_command_with_show_ui_and_value("insertText", false, text)
            .unwrap_or(false)
    }

    fn replace_range_manually(&self, text: &str) -> Result<(), PlatformError> {
        let selection = Self::window_selection()?;
        if selection.range_count() == 0 {
            return Err("no range to replace".into());
        }
        let range = selection
            .get_range_at(0)
            .map_err(|e| format!("get_range_at failed: {:?}", e))?;
        range
            .delete_contents()
            .map_err(|e| format!("delete_contents failed: {:?}", e))?;

        let text_node = document()?.create_text_node(text);
        range
            .insert_node(&text_node)
            .map_err(|e| format!("insert_node failed: {:?}", e))?;
        range
            .set_start_after(&text_node)
            .map_err(|e| format!("set_start_after failed: {:?}", e))?;
        range
            .set_end_after(&text_node)
            .map_err(|e| format!("set_end_after failed: {:?}", e))?;
        Self::apply_range(&range)
    }

    fn notify_insert(&self, text: &str) {
        let init = web_sys::InputEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        init.set_input_type("insertText");
        init.set_data(Some(text));
        match web_sys::InputEvent::new_with_event_init_dict("input", &init) {
            Ok(event) => dispatch(&self.element, &event),
            Err(e) => tracing::debug!(target: "fixmyspelling::surface", "create InputEvent failed: {:?}", e),
        }
    }

    fn notify_changed(&self) {
        dispatch_bubbling(&self.element, "input");
        dispatch_bubbling(&self.element, "change");
    }

    fn refocus_later(&self) {
        let element = self.element.clone();
        Timeout::new(0, move || {
            let _ = element.blur();
            let _ = element.focus();
        })
        .forget();
    }
}

/// An editable surface on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditableSurface {
    Plain(PlainField),
    Rich(RichRegion),
}

impl EditableSurface {
    /// Resolve the surface `element` belongs to, walking up as needed.
    pub fn resolve(element: &web_sys::Element) -> Option<Self> {
        let (DomElement(element), kind) = resolve_editable(DomElement(element.clone()))?;
        match kind {
            SurfaceKind::PlainField => PlainField::from_element(element).map(EditableSurface::Plain),
            SurfaceKind::RichRegion => element
                .dyn_into::<HtmlElement>()
                .ok()
                .map(|element| EditableSurface::Rich(RichRegion::new(element))),
        }
    }

    /// Resolve from an event target; text node targets use their parent.
    pub fn from_event_target(target: Option<web_sys::EventTarget>) -> Option<Self> {
        let node = target?.dyn_into::<web_sys::Node>().ok()?;
        let element = match node.dyn_into::<web_sys::Element>() {
            Ok(element) => element,
            Err(node) => node.parent_element()?,
        };
        Self::resolve(&element)
    }

    /// Surface of the document's focused element.
    pub fn focused() -> Option<Self> {
        let active = document().ok()?.active_element()?;
        Self::resolve(&active)
    }

    pub fn element(&self) -> &HtmlElement {
        match self {
            EditableSurface::Plain(field) => field.element(),
            EditableSurface::Rich(region) => region.element(),
        }
    }

    /// Whether the element is still in the document.
    pub fn is_connected(&self) -> bool {
        self.element().is_connected()
    }
}

impl TextSurface for EditableSurface {
    fn kind(&self) -> SurfaceKind {
        match self {
            EditableSurface::Plain(_) => SurfaceKind::PlainField,
            EditableSurface::Rich(_) => SurfaceKind::RichRegion,
        }
    }

    fn read_text(&self) -> String {
        match self {
            EditableSurface::Plain(field) => field.value(),
            EditableSurface::Rich(region) => region.rendered_text(),
        }
    }

    fn read_selection(&self) -> SelectionSpan {
        match self {
            EditableSurface::Plain(field) => {
                let (start, end) = field.selection_offsets();
                plain_field_span(&field.value(), start, end)
            }
            EditableSurface::Rich(region) => region
                .captured_selection()
                .unwrap_or_else(|| SelectionSpan::whole(region.rendered_text())),
        }
    }

    fn write_text(&self, text: &str, span: &SelectionSpan) -> Result<WriteReport, PlatformError> {
        let report = match self {
            EditableSurface::Plain(field) => write_plain(field, text, span),
            EditableSurface::Rich(region) => write_rich(region, text, span),
        };
        Ok(report)
    }

    fn bounding_rect(&self) -> Rect {
        let rect = self.element().get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }
}
