//! Mobile gate for the Cubik 3D editor.
//!
//! The editor only works in a desktop browser. This crate detects mobile
//! environments and swaps the page for a lightweight placeholder: a looping
//! teaser video, a localized message and a link back to the landing page.
//! The gate runs automatically once the DOM is ready, and both capabilities
//! are exported to JavaScript as `isMobile()` and `showPlaceholder()`.

pub mod detect;
pub mod lang;
pub mod placeholder;

pub use detect::{is_mobile, DetectionConfig, PLATFORM_MARKERS, TOUCH_MAX_WIDTH};
pub use lang::{Lang, Strings, STORAGE_KEY};
pub use placeholder::{show_placeholder, CONTAINER_ID, HOME_URL, VIDEO_ID, VIDEO_SRC};

use leptos::logging::log;
use leptos::prelude::document;
use wasm_bindgen::{prelude::*, JsCast};

/// Module entry point, run by the wasm loader. When the script is evaluated
/// before the DOM finished parsing, the gate is deferred to
/// `DOMContentLoaded`.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if document().ready_state() == "loading" {
        let on_ready = Closure::wrap(Box::new(run_gate) as Box<dyn FnMut()>);
        let _ = document().add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        );
        on_ready.forget();
    } else {
        run_gate();
    }
}

fn run_gate() {
    if is_mobile() {
        log!("[INFO] [gate] mobile environment detected, showing placeholder");
        show_placeholder();
    }
}
