//! Collapsible sidebar: desktop collapsed flag persisted in localStorage,
//! transient slide-out state on mobile, active menu link highlighting.

use std::cell::Cell;
use std::rc::Rc;

use contracts::shared::sidebar::{
    decode_collapsed, encode_collapsed, link_is_active, ViewportMode, MOBILE_BREAKPOINT_PX,
    SIDEBAR_COLLAPSED_KEY,
};

use crate::shared::storage::KeyValueStore;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SidebarConfig {
    pub breakpoint_px: f64,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: MOBILE_BREAKPOINT_PX,
        }
    }
}

/// Sidebar, main content, body and menu links of the page
pub trait SidebarView {
    fn viewport_width(&self) -> f64;

    /// `collapsed` on the sidebar together with `expanded` on the main content
    fn is_collapsed(&self) -> bool;
    fn set_collapsed(&self, collapsed: bool);

    /// `expanded` on the sidebar together with `sidebar-active` on the body
    fn is_mobile_expanded(&self) -> bool;
    fn set_mobile_expanded(&self, expanded: bool);

    fn current_path(&self) -> String;
    /// `href` of every menu link, empty when missing
    fn link_hrefs(&self) -> Vec<String>;
    fn mark_link_active(&self, index: usize);
}

/// Where a document click landed
#[derive(Clone, Copy, Debug, Default)]
pub struct ClickTarget {
    pub in_sidebar: bool,
    pub in_mobile_toggle: bool,
}

/// The persisted site-wide collapsed flag
pub struct SidebarSettings {
    store: Rc<dyn KeyValueStore>,
}

impl SidebarSettings {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn collapsed(&self) -> bool {
        decode_collapsed(self.store.get_item(SIDEBAR_COLLAPSED_KEY).as_deref())
    }

    pub fn set_collapsed(&self, collapsed: bool) {
        if let Err(err) = self
            .store
            .set_item(SIDEBAR_COLLAPSED_KEY, encode_collapsed(collapsed))
        {
            log::warn!("Failed to save sidebar state: {}", err);
        }
    }
}

pub struct SidebarController {
    view: Rc<dyn SidebarView>,
    settings: SidebarSettings,
    config: SidebarConfig,
    mode: Cell<ViewportMode>,
}

impl SidebarController {
    pub fn new(view: Rc<dyn SidebarView>, settings: SidebarSettings, config: SidebarConfig) -> Self {
        let mode = ViewportMode::from_width(view.viewport_width(), config.breakpoint_px);
        Self {
            view,
            settings,
            config,
            mode: Cell::new(mode),
        }
    }

    fn current_mode(&self) -> ViewportMode {
        ViewportMode::from_width(self.view.viewport_width(), self.config.breakpoint_px)
    }

    /// Applies the saved desktop state and highlights the current page's link
    pub fn initialize(&self) {
        if !self.mode.get().is_mobile() && self.settings.collapsed() {
            self.view.set_collapsed(true);
        }
        self.mark_active_links();
    }

    /// Desktop toggle button
    pub fn toggle(&self) {
        let collapsed = !self.view.is_collapsed();
        self.view.set_collapsed(collapsed);
        if !self.current_mode().is_mobile() {
            self.settings.set_collapsed(collapsed);
        }
    }

    /// Mobile toggle button; the caller stops the click from reaching the document
    pub fn toggle_mobile(&self) {
        self.view.set_mobile_expanded(!self.view.is_mobile_expanded());
    }

    /// Document click: closes the mobile sidebar when clicking elsewhere
    pub fn on_document_click(&self, target: ClickTarget) {
        if self.current_mode().is_mobile()
            && !target.in_sidebar
            && !target.in_mobile_toggle
            && self.view.is_mobile_expanded()
        {
            self.view.set_mobile_expanded(false);
        }
    }

    /// Window resize: swaps desktop and mobile classes when crossing the breakpoint
    pub fn on_resize(&self) {
        let mode = self.current_mode();
        if mode == self.mode.replace(mode) {
            return;
        }
        match mode {
            ViewportMode::Mobile => {
                self.view.set_collapsed(false);
                if !self.view.is_mobile_expanded() {
                    self.view.set_mobile_expanded(false);
                }
            }
            ViewportMode::Desktop => {
                self.view.set_mobile_expanded(false);
                self.view.set_collapsed(self.settings.collapsed());
            }
        }
    }

    /// Marks matching menu links active; returns how many matched
    pub fn mark_active_links(&self) -> usize {
        let current_path = self.view.current_path();
        let mut marked = 0;
        for (index, href) in self.view.link_hrefs().iter().enumerate() {
            if link_is_active(&current_path, href) {
                self.view.mark_link_active(index);
                marked += 1;
            }
        }
        marked
    }
}
