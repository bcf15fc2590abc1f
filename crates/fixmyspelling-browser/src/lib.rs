//! Browser DOM layer for fixmyspelling.
//!
//! This crate implements the core's platform traits against the DOM and
//! the extension APIs. It assumes a `wasm32-unknown-unknown` target
//! environment.
//!
//! # Architecture
//!
//! - `surface`: plain field and rich region adapters
//! - `offsets`: UTF-16 offsets over a region's text nodes
//! - `overlay`: the suggestion overlay
//! - `events`: page listeners and shortcut handling
//! - `chrome`: `chrome.*` bindings; `storage` builds the endpoint store on them
//! - `platform`: the `Platform` bundle and engine constructor
//!
//! # Re-exports
//!
//! This crate re-exports `fixmyspelling-core` for convenience, so consumers
//! only need to depend on `fixmyspelling-browser`.

// Re-export core crate
pub use fixmyspelling_core;
pub use fixmyspelling_core::*;

pub mod chrome;
pub mod clipboard;
pub mod events;
pub mod offsets;
pub mod overlay;
pub mod platform;
pub mod storage;
pub mod surface;
pub mod timer;

pub use clipboard::BrowserClipboard;
pub use events::{PageListeners, key_chord, message_target, trigger};
pub use overlay::DomOverlay;
pub use platform::{BrowserEngine, BrowserPlatform, browser_engine};
pub use storage::{SyncStorage, watch_endpoint};
pub use surface::{EditableSurface, PlainField, RichRegion, is_editable_element};
pub use timer::TimeoutScheduler;
