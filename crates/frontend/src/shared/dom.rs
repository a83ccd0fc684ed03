//! Small helpers over web-sys used by the page scripts.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget};

/// Registers an event listener for the lifetime of the page
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("Failed to listen for {}: {:?}", event, err);
    }
    closure.forget(); // Keep the closure alive
}

/// Runs `f` once the DOM is parsed
pub fn on_dom_ready<F>(document: &Document, f: F)
where
    F: FnOnce() + 'static,
{
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let mut f = Some(f);
    listen(document, "DOMContentLoaded", move |_| {
        if let Some(f) = f.take() {
            f();
        }
    });
}

/// Adds or removes a CSS class
pub fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// `value` of an input, select or textarea
pub fn field_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        Some(input.value())
    } else if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
        Some(select.value())
    } else {
        element
            .dyn_ref::<web_sys::HtmlTextAreaElement>()
            .map(|textarea| textarea.value())
    }
}

pub fn set_field_value(element: &Element, value: &str) {
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(textarea) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        textarea.set_value(value);
    }
}
