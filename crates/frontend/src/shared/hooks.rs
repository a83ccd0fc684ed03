//! Page-provided JavaScript functions the scripts call when available.

use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// Recalculates form totals after a restore (`calculateTotals`)
pub trait TotalsHook {
    fn recalculate(&self);
}

/// Appends exactly one empty item row at the end of the list (`addItemRow`).
/// Returns false when no row was added.
pub trait RowFactory {
    fn append_row(&self) -> bool;
}

/// Optional capabilities of the host page
#[derive(Clone, Default)]
pub struct PageHooks {
    pub totals: Option<Rc<dyn TotalsHook>>,
    pub rows: Option<Rc<dyn RowFactory>>,
}

impl PageHooks {
    /// Hooks resolved from `window.calculateTotals` and `window.addItemRow`
    pub fn from_window() -> Self {
        Self {
            totals: Some(Rc::new(GlobalFunction::new("calculateTotals"))),
            rows: Some(Rc::new(GlobalFunction::new("addItemRow"))),
        }
    }
}

/// Zero-argument function looked up on `window` at call time
pub struct GlobalFunction {
    name: &'static str,
}

impl GlobalFunction {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }

    fn lookup(&self) -> Option<Function> {
        let window = web_sys::window()?;
        Reflect::get(&window, &JsValue::from_str(self.name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }

    /// False when the page does not define the function or it threw
    pub fn call(&self) -> bool {
        let Some(function) = self.lookup() else {
            return false;
        };
        match function.call0(&JsValue::NULL) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("{} failed: {:?}", self.name, err);
                false
            }
        }
    }
}

impl TotalsHook for GlobalFunction {
    fn recalculate(&self) {
        self.call();
    }
}

impl RowFactory for GlobalFunction {
    fn append_row(&self) -> bool {
        self.call()
    }
}
