pub mod autosave;
pub mod sidebar;
