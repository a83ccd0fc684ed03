use std::rc::Rc;

use contracts::shared::autosave::{storage_key, AutosaveRecord, ItemRow};

use super::config::AutosaveConfig;
use super::fields::{capture, plan_restore};
use super::view::FormView;
use crate::shared::hooks::PageHooks;
use crate::shared::storage::KeyValueStore;
use crate::shared::timers::Clock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Nothing captured, storage left untouched
    Empty,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadCheck {
    NoDraft,
    Restorable(AutosaveRecord),
    /// Draft was too old and has been deleted
    Expired,
}

/// Draft persistence for one form on one page
pub struct AutosaveController {
    key: String,
    config: AutosaveConfig,
    storage: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
}

impl AutosaveController {
    pub fn new(
        form_id: &str,
        pathname: &str,
        config: AutosaveConfig,
        storage: Rc<dyn KeyValueStore>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            key: storage_key(form_id, pathname),
            config,
            storage,
            clock,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn config(&self) -> &AutosaveConfig {
        &self.config
    }

    /// True when a readable draft is stored under the key
    pub fn has_draft(&self) -> bool {
        self.load().is_some()
    }

    /// Stored draft; malformed data reads as no draft
    pub fn load(&self) -> Option<AutosaveRecord> {
        let json = self.storage.get_item(&self.key)?;
        match AutosaveRecord::from_json(&json) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("Ignoring saved data for {}: {}", self.key, err);
                None
            }
        }
    }

    pub fn save(&self, view: &dyn FormView) -> SaveOutcome {
        let data = capture(&view.controls(), &view.item_rows());
        if data.is_empty() {
            return SaveOutcome::Empty;
        }

        let record = AutosaveRecord::new(self.clock.now_ms(), data);
        let json = match record.to_json() {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Failed to encode form data: {}", err);
                return SaveOutcome::Failed;
            }
        };
        match self.storage.set_item(&self.key, &json) {
            Ok(()) => {
                log::info!("Form data autosaved");
                SaveOutcome::Saved
            }
            Err(err) => {
                log::warn!("Failed to autosave form data: {}", err);
                SaveOutcome::Failed
            }
        }
    }

    /// Page-load check: keeps fresh drafts, deletes expired ones
    pub fn check_on_load(&self) -> LoadCheck {
        let Some(record) = self.load() else {
            return LoadCheck::NoDraft;
        };
        if record.age_ms(self.clock.now_ms()) >= self.config.max_age_ms {
            self.clear();
            LoadCheck::Expired
        } else {
            LoadCheck::Restorable(record)
        }
    }

    /// Puts the stored draft back into the form. False when there is nothing to restore.
    pub fn restore(&self, view: &dyn FormView, hooks: &PageHooks) -> bool {
        let Some(record) = self.load() else {
            return false;
        };

        for (index, update) in plan_restore(&view.controls(), &record.data) {
            view.apply(index, &update);
        }
        if let Some(rows) = &record.data.item_rows {
            restore_item_rows(view, hooks, rows);
        }
        if let Some(totals) = &hooks.totals {
            totals.recalculate();
        }

        log::info!("Form data restored");
        true
    }

    pub fn clear(&self) {
        self.storage.remove_item(&self.key);
        log::info!("Saved form data cleared");
    }
}

/// Rebuilds the item rows: the first existing row is reused, the rest are appended
/// through the page's row factory and filled as the last row in the document.
fn restore_item_rows(view: &dyn FormView, hooks: &PageHooks, rows: &[ItemRow]) {
    view.remove_extra_rows();
    let has_first_row = view.item_row_count() > 0;
    if has_first_row {
        view.write_row(0, &ItemRow::default());
    }

    for (index, item) in rows.iter().enumerate() {
        if index == 0 && has_first_row {
            view.write_row(0, item);
            continue;
        }
        let Some(factory) = &hooks.rows else {
            continue;
        };
        if factory.append_row() {
            if let Some(last) = view.item_row_count().checked_sub(1) {
                view.write_row(last, item);
            }
        }
    }
}
