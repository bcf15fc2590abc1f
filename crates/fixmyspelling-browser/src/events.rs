//! Page-level event wiring for the content script.
//!
//! Listens for right-clicks (to remember the target surface), outside clicks
//! and Escape (to hide the overlay), scroll and resize (to keep the overlay
//! anchored), and the in-page keyboard shortcuts.

use fixmyspelling_core::{CorrectionMode, KeyChord, SkipReason, TextSurface, TriggerResponse};
use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;

use crate::overlay::DomOverlay;
use crate::platform::BrowserEngine;
use crate::surface::{EditableSurface, is_editable_element};

/// Extract the chord of a keydown event.
pub fn key_chord(event: &web_sys::KeyboardEvent) -> KeyChord {
    KeyChord {
        key: event.key(),
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        alt: event.alt_key(),
    }
}

/// Start a correction on `surface` and send the request in the background.
///
/// Returns as soon as the trigger is accepted or dropped; the response only
/// reports whether a surface was found.
pub fn trigger(
    engine: &BrowserEngine,
    mode: CorrectionMode,
    surface: Option<EditableSurface>,
) -> TriggerResponse {
    let response = TriggerResponse::for_target(surface.is_some());
    match engine.start(mode, surface) {
        Ok(request) => {
            let engine = engine.clone();
            wasm_bindgen_futures::spawn_local(async move { engine.run(request).await });
        }
        Err(SkipReason::NoEditableTarget) => {
            tracing::debug!(target: "fixmyspelling::engine", %mode, "no editable element focused");
        }
        Err(_) => {}
    }
    response
}

/// Target of a trigger that carries no element of its own.
///
/// The focused editable element wins. Otherwise the last right-clicked
/// surface is used, unless it has since left the document.
pub fn message_target(engine: &BrowserEngine) -> Option<EditableSurface> {
    EditableSurface::focused().or_else(|| {
        let tracked = engine.active_surface()?;
        if tracked.is_connected() {
            Some(tracked)
        } else {
            tracing::debug!(target: "fixmyspelling::surface", "tracked surface was removed from the page");
            None
        }
    })
}

/// Listeners that live as long as this value.
pub struct PageListeners {
    _listeners: Vec<EventListener>,
}

impl PageListeners {
    /// Attach all page listeners.
    pub fn install(engine: &BrowserEngine, overlay: &DomOverlay) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let mut listeners = Vec::with_capacity(5);

        let contextmenu_engine = engine.clone();
        listeners.push(EventListener::new(&document, "contextmenu", move |event| {
            if let Some(surface) = EditableSurface::from_event_target(event.target()) {
                tracing::trace!(target: "fixmyspelling::surface", kind = ?surface.kind(), "tracking right-clicked surface");
                contextmenu_engine.track(surface);
            }
        }));

        let click_engine = engine.clone();
        let click_overlay = overlay.clone();
        listeners.push(EventListener::new(&document, "click", move |event| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            if click_overlay.contains(&target) || is_editable_element(&target) {
                return;
            }
            click_engine.dismiss();
        }));

        let scroll_engine = engine.clone();
        listeners.push(EventListener::new_with_options(
            &window,
            "scroll",
            EventListenerOptions::run_in_capture_phase(),
            move |_| scroll_engine.reposition(),
        ));

        let resize_engine = engine.clone();
        listeners.push(EventListener::new(&window, "resize", move |_| {
            resize_engine.reposition();
        }));

        // Capture phase on the window runs before any page handler, so a
        // matched shortcut never reaches the page.
        let key_engine = engine.clone();
        listeners.push(EventListener::new_with_options(
            &window,
            "keydown",
            EventListenerOptions {
                phase: EventListenerPhase::Capture,
                passive: false,
            },
            move |event| {
                let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                let chord = key_chord(event);
                if chord.is_escape() {
                    key_engine.dismiss();
                    return;
                }
                let Some(mode) = key_engine.shortcut_for(&chord) else {
                    return;
                };
                event.prevent_default();
                event.stop_immediate_propagation();
                if let Some(surface) = EditableSurface::focused() {
                    trigger(&key_engine, mode, Some(surface));
                }
            },
        ));

        Some(Self {
            _listeners: listeners,
        })
    }
}

