//! Form autosave: snapshots a form into localStorage and offers to restore it.
//!
//! `controller` and `session` work against the ports in `view`, `storage` and
//! `timers`; `dom` and `prompt` are the browser adapters.

pub mod config;
pub mod controller;
pub mod dom;
pub mod fields;
pub mod prompt;
pub mod session;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::AutosaveConfig;
pub use controller::{AutosaveController, LoadCheck, SaveOutcome};
pub use dom::attach;
pub use session::AutosaveSession;
