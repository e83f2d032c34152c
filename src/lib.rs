//! webterm - a fake command-line shell inside a web page
//!
//! Keystrokes are captured from the DOM, echoed into a styled text
//! buffer, and a small set of registered commands produce canned HTML
//! output. The core is split so it stays testable without a browser:
//!
//! - `shell`: command table, history, dispatch, autocomplete (pure)
//! - `editor`: the single-line edit buffer (pure)
//! - `terminal`: key event -> state transition machine (pure)
//! - `dom` / `boot`: browser wiring, wasm32 only

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod commands;
pub mod editor;
pub mod shell;
pub mod terminal;

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
mod boot;

/// Console logging helper
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

/// Log to browser console (WASM)
#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::log(&format!($($t)*))
    };
}

/// Log to stderr (native)
#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        eprintln!($($t)*)
    };
}

/// Initialize panic hook for better error messages in browser console
#[cfg(target_arch = "wasm32")]
fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Mount the terminal. This is the WASM entry point.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    init_panic_hook();
    if let Err(e) = boot::boot() {
        console_log!("[webterm] mount failed: {:?}", e);
    }
}
