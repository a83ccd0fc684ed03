pub mod autosave;
pub mod date_utils;
pub mod dom;
pub mod hooks;
pub mod storage;
pub mod timers;
