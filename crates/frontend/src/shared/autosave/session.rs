use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::controller::{AutosaveController, LoadCheck, SaveOutcome};
use super::view::{Action, AutosaveUi, FormView};
use crate::shared::hooks::PageHooks;
use crate::shared::timers::{Scheduler, TimerHandle};

/// A running autosave: debounce and periodic timers plus the prompts
pub struct AutosaveSession {
    controller: AutosaveController,
    view: Rc<dyn FormView>,
    ui: Rc<dyn AutosaveUi>,
    hooks: PageHooks,
    scheduler: Rc<dyn Scheduler>,
    pending_save: RefCell<Option<TimerHandle>>,
    periodic_save: RefCell<Option<TimerHandle>>,
}

impl AutosaveSession {
    /// Checks for a stored draft, starts the periodic save and adds the restore button
    pub fn start(
        controller: AutosaveController,
        view: Rc<dyn FormView>,
        ui: Rc<dyn AutosaveUi>,
        hooks: PageHooks,
        scheduler: Rc<dyn Scheduler>,
    ) -> Rc<Self> {
        let session = Rc::new(Self {
            controller,
            view,
            ui,
            hooks,
            scheduler,
            pending_save: RefCell::new(None),
            periodic_save: RefCell::new(None),
        });

        session.check_for_draft();
        session.start_periodic_save();
        if session.controller.has_draft() {
            session.ui.add_restore_button(session.action(Self::restore));
        }
        session
    }

    pub fn controller(&self) -> &AutosaveController {
        &self.controller
    }

    /// Input event: (re)arms the debounce timer
    pub fn on_input(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let handle = self.scheduler.timeout(
            self.controller.config().debounce_ms,
            Box::new(move || {
                if let Some(session) = weak.upgrade() {
                    session.save_now();
                }
            }),
        );
        // replacing the previous handle cancels it
        *self.pending_save.borrow_mut() = Some(handle);
    }

    pub fn on_submit(&self) {
        self.controller.clear();
    }

    pub fn save_now(&self) -> SaveOutcome {
        let outcome = self.controller.save(self.view.as_ref());
        if outcome == SaveOutcome::Saved {
            self.ui.flash_saved();
        }
        outcome
    }

    pub fn restore(&self) -> bool {
        self.controller.restore(self.view.as_ref(), &self.hooks)
    }

    pub fn discard(&self) {
        self.controller.clear();
    }

    fn check_for_draft(self: &Rc<Self>) {
        if let LoadCheck::Restorable(record) = self.controller.check_on_load() {
            self.ui.show_restore_prompt(
                record.timestamp,
                self.action(Self::restore),
                self.action(Self::discard),
            );
        }
    }

    fn start_periodic_save(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let handle = self.scheduler.interval(
            self.controller.config().save_interval_ms,
            Box::new(move || {
                if let Some(session) = weak.upgrade() {
                    session.save_now();
                }
            }),
        );
        *self.periodic_save.borrow_mut() = Some(handle);
    }

    /// UI callback that does nothing once the session is gone
    fn action<R>(self: &Rc<Self>, f: fn(&Self) -> R) -> Action
    where
        R: 'static,
    {
        let weak: Weak<Self> = Rc::downgrade(self);
        Rc::new(move || {
            if let Some(session) = weak.upgrade() {
                f(&session);
            }
        })
    }
}
