pub mod dom;
pub mod sidebar;

pub use dom::attach;
pub use sidebar::{SidebarConfig, SidebarController, SidebarSettings, SidebarView};
