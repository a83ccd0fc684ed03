//! Restore prompt, restore-draft button and the "Draft saved" toast.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlFormElement};

use super::view::{Action, AutosaveUi};
use crate::shared::date_utils::format_timestamp_ms;

const INDICATOR_ID: &str = "autosaveIndicator";
const INDICATOR_CLASS: &str = "position-fixed bottom-0 end-0 m-3 p-2 bg-success text-white rounded shadow";

#[component]
pub fn RestorePrompt(
    saved_at: String,
    on_restore: Action,
    on_discard: Action,
    on_close: Action,
) -> impl IntoView {
    let close_after_restore = on_close.clone();
    let close_after_discard = on_close.clone();

    view! {
        <div class="alert alert-info alert-dismissible fade show" role="alert">
            <strong>"Unsaved data found!"</strong>
            {format!(" You have a draft saved on {}.", saved_at)}
            <button
                type="button"
                class="btn btn-sm btn-primary mx-2"
                on:click=move |_| {
                    on_restore();
                    close_after_restore();
                }
            >
                "Restore"
            </button>
            <button
                type="button"
                class="btn btn-sm btn-secondary"
                on:click=move |_| {
                    on_discard();
                    close_after_discard();
                }
            >
                "Discard"
            </button>
            <button
                type="button"
                class="btn-close"
                aria-label="Close"
                on:click=move |_| on_close()
            ></button>
        </div>
    }
}

#[component]
pub fn RestoreDraftButton(on_restore: Action) -> impl IntoView {
    view! {
        <button
            type="button"
            class="btn btn-outline-warning me-2"
            on:click=move |_| on_restore()
        >
            <i class="fas fa-history me-2"></i>
            " Restore Draft"
        </button>
    }
}

/// Browser `AutosaveUi`: Bootstrap markup injected into the host page
pub struct DomAutosaveUi {
    document: Document,
    form: HtmlFormElement,
    indicator_ms: u32,
}

impl DomAutosaveUi {
    pub fn new(document: Document, form: HtmlFormElement, indicator_ms: u32) -> Self {
        Self {
            document,
            form,
            indicator_ms,
        }
    }

    /// Empty container inserted as the first child of `parent`
    fn prepend_container(&self, parent: &web_sys::Element, tag: &str) -> Option<HtmlElement> {
        let container = self
            .document
            .create_element(tag)
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        parent
            .insert_before(&container, parent.first_child().as_ref())
            .ok()?;
        Some(container)
    }

    fn indicator(&self) -> Option<HtmlElement> {
        if let Some(existing) = self.document.get_element_by_id(INDICATOR_ID) {
            return existing.dyn_into::<HtmlElement>().ok();
        }
        let indicator = self
            .document
            .create_element("div")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        indicator.set_id(INDICATOR_ID);
        indicator.set_class_name(INDICATOR_CLASS);
        let style = indicator.style();
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("transition", "opacity 0.3s");
        indicator.set_inner_html("<i class=\"fas fa-save me-2\"></i> Draft saved");
        self.document.body()?.append_child(&indicator).ok()?;
        Some(indicator)
    }
}

impl AutosaveUi for DomAutosaveUi {
    fn show_restore_prompt(&self, saved_at_ms: i64, on_restore: Action, on_discard: Action) {
        let Some(container) = self.prepend_container(&self.form, "div") else {
            return;
        };
        let saved_at = format_timestamp_ms(saved_at_ms);
        let holder = container.clone();
        let on_close: Action = Rc::new(move || holder.remove());

        leptos::mount::mount_to(container, move || {
            view! {
                <RestorePrompt
                    saved_at=saved_at
                    on_restore=on_restore
                    on_discard=on_discard
                    on_close=on_close
                />
            }
        })
        .forget();
    }

    fn add_restore_button(&self, on_restore: Action) {
        let Ok(Some(actions)) = self.form.query_selector(".form-actions") else {
            return;
        };
        let Some(container) = self.prepend_container(&actions, "span") else {
            return;
        };
        leptos::mount::mount_to(container, move || {
            view! { <RestoreDraftButton on_restore=on_restore /> }
        })
        .forget();
    }

    fn flash_saved(&self) {
        let Some(indicator) = self.indicator() else {
            return;
        };
        let _ = indicator.style().set_property("opacity", "1");
        Timeout::new(self.indicator_ms, move || {
            let _ = indicator.style().set_property("opacity", "0");
        })
        .forget();
    }
}
