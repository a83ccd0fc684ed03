//! In-memory ports for autosave tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use contracts::shared::autosave::ItemRow;

use super::fields::{apply_update, ControlUpdate, FormControl, RowFields};
use super::view::{Action, AutosaveUi, FormView};
use crate::shared::hooks::{PageHooks, RowFactory, TotalsHook};
use crate::shared::storage::KeyValueStore;

#[derive(Default)]
pub struct MemoryFormView {
    pub controls: RefCell<Vec<FormControl>>,
    pub rows: Rc<RefCell<Vec<RowFields>>>,
}

impl MemoryFormView {
    pub fn new(controls: Vec<FormControl>, rows: Vec<RowFields>) -> Rc<Self> {
        Rc::new(Self {
            controls: RefCell::new(controls),
            rows: Rc::new(RefCell::new(rows)),
        })
    }

    pub fn set_text(&self, name: &str, value: &str) {
        for control in self.controls.borrow_mut().iter_mut() {
            if control.name == name {
                control.value = value.to_string();
            }
        }
    }

    pub fn control(&self, index: usize) -> FormControl {
        self.controls.borrow()[index].clone()
    }

    pub fn rows(&self) -> Vec<RowFields> {
        self.rows.borrow().clone()
    }
}

impl FormView for MemoryFormView {
    fn controls(&self) -> Vec<FormControl> {
        self.controls.borrow().clone()
    }

    fn apply(&self, index: usize, update: &ControlUpdate) {
        if let Some(control) = self.controls.borrow_mut().get_mut(index) {
            apply_update(control, update);
        }
    }

    fn item_rows(&self) -> Vec<RowFields> {
        self.rows.borrow().clone()
    }

    fn item_row_count(&self) -> usize {
        self.rows.borrow().len()
    }

    fn remove_extra_rows(&self) {
        self.rows.borrow_mut().truncate(1);
    }

    fn write_row(&self, index: usize, row: &ItemRow) {
        if let Some(fields) = self.rows.borrow_mut().get_mut(index) {
            if let Some(name) = fields.name.as_mut() {
                *name = row.name.clone();
            }
            if let Some(price) = fields.price.as_mut() {
                *price = row.price.clone();
            }
            if let Some(quantity) = fields.quantity.as_mut() {
                *quantity = row.quantity.clone();
            }
        }
    }
}

/// `addItemRow` stand-in appending an empty complete row
pub struct AppendRow {
    pub rows: Rc<RefCell<Vec<RowFields>>>,
}

impl RowFactory for AppendRow {
    fn append_row(&self) -> bool {
        self.rows
            .borrow_mut()
            .push(RowFields::complete("", "", ""));
        true
    }
}

#[derive(Default)]
pub struct CountTotals {
    pub calls: Cell<u32>,
}

impl TotalsHook for CountTotals {
    fn recalculate(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

pub fn hooks_for(view: &MemoryFormView) -> (PageHooks, Rc<CountTotals>) {
    let totals = Rc::new(CountTotals::default());
    let hooks = PageHooks {
        totals: Some(totals.clone()),
        rows: Some(Rc::new(AppendRow {
            rows: view.rows.clone(),
        })),
    };
    (hooks, totals)
}

/// Storage whose writes always fail, like a full localStorage quota
#[derive(Default)]
pub struct FailingStorage {
    pub writes: Cell<u32>,
}

impl KeyValueStore for FailingStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), String> {
        self.writes.set(self.writes.get() + 1);
        Err("QuotaExceededError".to_string())
    }

    fn remove_item(&self, _key: &str) {}
}

#[derive(Default)]
pub struct RecordingUi {
    pub prompts: RefCell<Vec<(i64, Action, Action)>>,
    pub buttons: RefCell<Vec<Action>>,
    pub flashes: Cell<u32>,
}

impl RecordingUi {
    pub fn prompt_count(&self) -> usize {
        self.prompts.borrow().len()
    }

    pub fn click_prompt_restore(&self) {
        let action = self.prompts.borrow()[0].1.clone();
        action();
    }

    pub fn click_prompt_discard(&self) {
        let action = self.prompts.borrow()[0].2.clone();
        action();
    }

    pub fn click_restore_button(&self) {
        let action = self.buttons.borrow()[0].clone();
        action();
    }
}

impl AutosaveUi for RecordingUi {
    fn show_restore_prompt(&self, saved_at_ms: i64, on_restore: Action, on_discard: Action) {
        self.prompts
            .borrow_mut()
            .push((saved_at_ms, on_restore, on_discard));
    }

    fn add_restore_button(&self, on_restore: Action) {
        self.buttons.borrow_mut().push(on_restore);
    }

    fn flash_saved(&self) {
        self.flashes.set(self.flashes.get() + 1);
    }
}
