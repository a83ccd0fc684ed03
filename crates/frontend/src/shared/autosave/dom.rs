use std::rc::Rc;

use contracts::shared::autosave::ItemRow;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement};

use super::config::AutosaveConfig;
use super::controller::AutosaveController;
use super::fields::{ControlKind, ControlUpdate, FormControl, RowFields, SelectOption};
use super::prompt::DomAutosaveUi;
use super::session::AutosaveSession;
use super::view::FormView;
use crate::shared::dom::{field_value, listen, set_field_value};
use crate::shared::hooks::PageHooks;
use crate::shared::storage::LocalStorage;
use crate::shared::timers::{BrowserClock, GlooScheduler};

const ITEM_ROW_SELECTOR: &str = ".item-row";
const ITEM_NAME_SELECTOR: &str = "[name^=\"item_name\"]";
const ITEM_PRICE_SELECTOR: &str = "[name^=\"item_price\"]";
const ITEM_QUANTITY_SELECTOR: &str = "[name^=\"item_quantity\"]";

/// Starts autosave for the form with the given id.
/// None when the form (or localStorage) is missing.
pub fn attach(form_id: &str, config: AutosaveConfig) -> Option<Rc<AutosaveSession>> {
    let window = web_sys::window()?;
    let document = window.document()?;

    let Some(form) = document
        .get_element_by_id(form_id)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        log::error!("Form with ID {} not found", form_id);
        return None;
    };
    let Some(storage) = LocalStorage::open() else {
        log::error!("localStorage unavailable, autosave disabled for {}", form_id);
        return None;
    };
    let pathname = window.location().pathname().unwrap_or_default();

    let controller = AutosaveController::new(
        form_id,
        &pathname,
        config,
        Rc::new(storage),
        Rc::new(BrowserClock),
    );
    let view = Rc::new(DomFormView::new(document.clone(), form.clone()));
    let ui = Rc::new(DomAutosaveUi::new(document, form.clone(), config.indicator_ms));
    let session = AutosaveSession::start(
        controller,
        view,
        ui,
        PageHooks::from_window(),
        Rc::new(GlooScheduler),
    );

    let on_input = session.clone();
    listen(&form, "input", move |_| on_input.on_input());
    let on_submit = session.clone();
    listen(&form, "submit", move |_| on_submit.on_submit());

    Some(session)
}

/// `FormView` over a live form and the document's `.item-row` elements
pub struct DomFormView {
    document: Document,
    form: HtmlFormElement,
}

impl DomFormView {
    pub fn new(document: Document, form: HtmlFormElement) -> Self {
        Self { document, form }
    }

    fn element(&self, index: usize) -> Option<Element> {
        self.form.elements().item(u32::try_from(index).ok()?)
    }

    fn rows(&self) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(ITEM_ROW_SELECTOR) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

fn read_control(element: &Element) -> Option<FormControl> {
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        let mut control = FormControl::new(
            &input.name(),
            ControlKind::from_type(&input.type_()),
            &input.value(),
        );
        control.checked = input.checked();
        return Some(control);
    }
    if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
        let mut control = FormControl::new(
            &select.name(),
            ControlKind::from_type(&select.type_()),
            &select.value(),
        );
        let options = select.options();
        control.options = (0..options.length())
            .filter_map(|i| options.get_with_index(i))
            .filter_map(|el| el.dyn_into::<web_sys::HtmlOptionElement>().ok())
            .map(|option| SelectOption {
                value: option.value(),
                selected: option.selected(),
            })
            .collect();
        return Some(control);
    }
    if let Some(textarea) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        return Some(FormControl::text(&textarea.name(), &textarea.value()));
    }
    if let Some(button) = element.dyn_ref::<web_sys::HtmlButtonElement>() {
        return Some(FormControl::new(
            &button.name(),
            ControlKind::from_type(&button.type_()),
            &button.value(),
        ));
    }
    None
}

fn write_control(element: &Element, update: &ControlUpdate) {
    match update {
        ControlUpdate::Checked(checked) => {
            if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
                input.set_checked(*checked);
            }
        }
        ControlUpdate::Value(value) => set_field_value(element, value),
        ControlUpdate::Selection(selected) => {
            if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
                let options = select.options();
                for (i, selected) in (0..options.length()).zip(selected) {
                    if let Some(option) = options
                        .get_with_index(i)
                        .and_then(|el| el.dyn_into::<web_sys::HtmlOptionElement>().ok())
                    {
                        option.set_selected(*selected);
                    }
                }
            }
        }
    }
}

fn row_field(row: &Element, selector: &str) -> Option<Element> {
    row.query_selector(selector).ok().flatten()
}

impl FormView for DomFormView {
    fn controls(&self) -> Vec<FormControl> {
        let elements = self.form.elements();
        (0..elements.length())
            .map(|i| {
                elements
                    .item(i)
                    .and_then(|el| read_control(&el))
                    // keeps indices aligned with form.elements
                    .unwrap_or_else(|| FormControl::new("", ControlKind::Button, ""))
            })
            .collect()
    }

    fn apply(&self, index: usize, update: &ControlUpdate) {
        if let Some(element) = self.element(index) {
            write_control(&element, update);
        }
    }

    fn item_rows(&self) -> Vec<RowFields> {
        self.rows()
            .iter()
            .map(|row| RowFields {
                name: row_field(row, ITEM_NAME_SELECTOR).and_then(|el| field_value(&el)),
                price: row_field(row, ITEM_PRICE_SELECTOR).and_then(|el| field_value(&el)),
                quantity: row_field(row, ITEM_QUANTITY_SELECTOR).and_then(|el| field_value(&el)),
            })
            .collect()
    }

    fn item_row_count(&self) -> usize {
        self.rows().len()
    }

    fn remove_extra_rows(&self) {
        for row in self.rows().iter().skip(1) {
            row.remove();
        }
    }

    fn write_row(&self, index: usize, item: &ItemRow) {
        let Some(row) = self.rows().into_iter().nth(index) else {
            return;
        };
        for (selector, value) in [
            (ITEM_NAME_SELECTOR, &item.name),
            (ITEM_PRICE_SELECTOR, &item.price),
            (ITEM_QUANTITY_SELECTOR, &item.quantity),
        ] {
            if let Some(field) = row_field(&row, selector) {
                set_field_value(&field, value);
            }
        }
    }
}
