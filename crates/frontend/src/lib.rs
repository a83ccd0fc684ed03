pub mod layout;
pub mod shared;

use shared::autosave::AutosaveConfig;
use wasm_bindgen::prelude::wasm_bindgen;

/// Forms that get autosave without any page-side setup
const AUTOSAVE_FORM_IDS: [&str; 2] = ["quotationForm", "invoiceForm"];

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let page = document.clone();
    shared::dom::on_dom_ready(&document, move || {
        let _ = layout::left::attach(layout::left::SidebarConfig::default());
        for form_id in AUTOSAVE_FORM_IDS {
            if page.get_element_by_id(form_id).is_some() {
                let _ = shared::autosave::attach(form_id, AutosaveConfig::default());
            }
        }
    });
}

/// Opts another form into autosave; the interval defaults to 30 seconds.
/// Returns false when the form was not found.
#[wasm_bindgen]
pub fn attach_form_autosave(form_id: &str, save_interval_ms: Option<u32>) -> bool {
    let mut config = AutosaveConfig::default();
    if let Some(interval) = save_interval_ms {
        config = config.with_save_interval(interval);
    }
    shared::autosave::attach(form_id, config).is_some()
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
