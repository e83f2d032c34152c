//! DOM wiring for the terminal
//!
//! Binds a `Terminal` to a host container element. The host page provides
//! the markup: four regions addressable as `.prompt`, `.left`, `.cursor`,
//! `.right` for the visible line, and a `.content` region serving as
//! append-only scrollback. A single keydown listener feeds parsed keys to
//! the state machine and re-renders; everything visible is recomputed
//! from the terminal state, never patched independently of it.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use crate::terminal::{Key, Terminal};

/// Handles to the host page's regions
struct Regions {
    container: HtmlElement,
    prompt: Element,
    left: Element,
    cursor: Element,
    right: Element,
    content: Element,
}

impl Regions {
    fn bind(container: &HtmlElement) -> Result<Self, JsValue> {
        Ok(Self {
            container: container.clone(),
            prompt: query(container, ".prompt")?,
            left: query(container, ".left")?,
            cursor: query(container, ".cursor")?,
            right: query(container, ".right")?,
            content: query(container, ".content")?,
        })
    }

    /// Append new scrollback fragments, redraw the visible line from the
    /// authoritative buffer/cursor state, and keep the newest line in view.
    fn render(&self, term: &mut Terminal) {
        for fragment in term.drain_scrollback() {
            let html = format!("{}{}", self.content.inner_html(), fragment);
            self.content.set_inner_html(&html);
        }

        let view = term.line_view();
        self.prompt.set_inner_html(term.prompt());
        self.left.set_inner_html(view.left);
        match view.cursor {
            Some(ch) => self.cursor.set_inner_html(&ch.to_string()),
            None => self.cursor.set_inner_html("&nbsp;"),
        }
        self.right.set_inner_html(view.right);

        self.container
            .set_scroll_top(self.container.scroll_height());
    }
}

fn query(container: &HtmlElement, selector: &str) -> Result<Element, JsValue> {
    container
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("host element has no {} region", selector)))
}

/// Attach a terminal to the host element and start handling keystrokes.
pub fn mount(container: &HtmlElement, terminal: Terminal) -> Result<(), JsValue> {
    let regions = Regions::bind(container)?;
    let term = Rc::new(RefCell::new(terminal));

    // Initial render: welcome message (if any) and the empty prompt line
    regions.render(&mut term.borrow_mut());

    let term_for_keys = term.clone();
    let callback = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        // Leave browser shortcuts (copy, reload, ...) alone
        if event.ctrl_key() || event.alt_key() || event.meta_key() {
            return;
        }
        let Some(key) = Key::parse(&event.key(), &event.code()) else {
            return;
        };
        event.prevent_default();

        let mut term = term_for_keys.borrow_mut();
        term.handle_key(key);
        regions.render(&mut term);
    }) as Box<dyn FnMut(KeyboardEvent)>);

    container.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())?;
    callback.forget();

    Ok(())
}
