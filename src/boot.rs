//! Boot sequence
//!
//! Locate the host element, build the default command set, and mount the
//! terminal. Host pages that want their own commands call `dom::mount`
//! with their own `Shell` instead.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

use crate::commands::{default_commands, PROMPT};
use crate::dom;
use crate::shell::Shell;
use crate::terminal::Terminal;

/// ID of the container element the host page provides
const HOST_ELEMENT_ID: &str = "terminal";

pub fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let container: web_sys::HtmlElement = document
        .get_element_by_id(HOST_ELEMENT_ID)
        .ok_or("no #terminal element")?
        .dyn_into()?;

    let shell = Shell::new(default_commands(), PROMPT, "");
    dom::mount(&container, Terminal::new(shell))
}
