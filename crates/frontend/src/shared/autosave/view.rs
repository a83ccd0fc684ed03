use std::rc::Rc;

use contracts::shared::autosave::ItemRow;

use super::fields::{ControlUpdate, FormControl, RowFields};

/// The watched form and the page's item rows
pub trait FormView {
    /// Named and unnamed controls in `form.elements` order
    fn controls(&self) -> Vec<FormControl>;
    /// `index` refers to the order returned by `controls`
    fn apply(&self, index: usize, update: &ControlUpdate);

    /// Every `.item-row` in the document, in document order
    fn item_rows(&self) -> Vec<RowFields>;
    fn item_row_count(&self) -> usize;
    /// Removes every item row except the first
    fn remove_extra_rows(&self);
    /// Writes whichever of the three fields exist in the row
    fn write_row(&self, index: usize, row: &ItemRow);
}

pub type Action = Rc<dyn Fn()>;

/// Autosave notifications shown to the user
pub trait AutosaveUi {
    /// Dismissible prompt at the top of the form; removes itself after either action
    fn show_restore_prompt(&self, saved_at_ms: i64, on_restore: Action, on_discard: Action);
    /// "Restore Draft" button in the form's action area
    fn add_restore_button(&self, on_restore: Action);
    /// Short-lived "Draft saved" toast
    fn flash_saved(&self);
}
