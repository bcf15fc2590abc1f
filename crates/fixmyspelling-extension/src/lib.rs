//! WASM entry points for the fixmyspelling browser extension.
//!
//! One module serves all three extension contexts. Each loader script calls
//! the entry point for its context after initializing the module:
//!
//! - `startContentScript`: the in-page engine, overlay and listeners
//! - `startBackground`: context menus, commands and message relay
//! - `startOptionsPage`: the endpoint settings form

mod background;
mod content;
mod options;

pub use background::start_background;
pub use content::start_content_script;
pub use options::start_options_page;

use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // Only our own targets; page scripts share the console.
    let filter = EnvFilter::new("warn,fixmyspelling=debug,fixmyspelling_extension=debug");

    let reg = Registry::default().with(filter).with(wasm_layer);

    let _ = set_global_default(reg);
}
