use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, Window};

use super::sidebar::{ClickTarget, SidebarConfig, SidebarController, SidebarSettings, SidebarView};
use crate::shared::dom::{has_class, listen, set_class};
use crate::shared::storage::{KeyValueStore, LocalStorage, MemoryStorage};

const SIDEBAR_ID: &str = "sidebar";
const MAIN_CONTENT_ID: &str = "mainContent";
const TOGGLE_ID: &str = "sidebarToggle";
const MOBILE_TOGGLE_ID: &str = "mobileSidebarToggle";
const MENU_LINK_SELECTOR: &str = ".sidebar-menu a";

/// Wires the sidebar controller to the page. None when `#sidebar` or `#mainContent` is missing.
pub fn attach(config: SidebarConfig) -> Option<Rc<SidebarController>> {
    let window = web_sys::window()?;
    let document = window.document()?;

    let (Some(sidebar), Some(main_content)) = (
        document.get_element_by_id(SIDEBAR_ID),
        document.get_element_by_id(MAIN_CONTENT_ID),
    ) else {
        log::warn!("Sidebar or mainContent elements not found");
        return None;
    };
    let body = document.body()?;

    let store: Rc<dyn KeyValueStore> = match LocalStorage::open() {
        Some(storage) => Rc::new(storage),
        None => {
            log::warn!("localStorage unavailable, sidebar state will not persist");
            Rc::new(MemoryStorage::new())
        }
    };

    let view = Rc::new(DomSidebarView {
        window: window.clone(),
        document: document.clone(),
        sidebar: sidebar.clone(),
        main_content,
        body,
    });
    let controller = Rc::new(SidebarController::new(
        view,
        SidebarSettings::new(store),
        config,
    ));
    controller.initialize();

    if let Some(toggle) = document.get_element_by_id(TOGGLE_ID) {
        let controller = controller.clone();
        listen(&toggle, "click", move |_| controller.toggle());
    }

    if let Some(mobile_toggle) = document.get_element_by_id(MOBILE_TOGGLE_ID) {
        let on_toggle = controller.clone();
        listen(&mobile_toggle, "click", move |event| {
            event.stop_propagation();
            on_toggle.toggle_mobile();
        });

        let on_click = controller.clone();
        listen(&document, "click", move |event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            on_click.on_document_click(ClickTarget {
                in_sidebar: sidebar.contains(target.as_ref()),
                in_mobile_toggle: mobile_toggle.contains(target.as_ref()),
            });
        });
    }

    let on_resize = controller.clone();
    listen(&window, "resize", move |_| on_resize.on_resize());

    Some(controller)
}

pub struct DomSidebarView {
    window: Window,
    document: Document,
    sidebar: Element,
    main_content: Element,
    body: HtmlElement,
}

impl SidebarView for DomSidebarView {
    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or_default()
    }

    fn is_collapsed(&self) -> bool {
        has_class(&self.sidebar, "collapsed")
    }

    fn set_collapsed(&self, collapsed: bool) {
        set_class(&self.sidebar, "collapsed", collapsed);
        set_class(&self.main_content, "expanded", collapsed);
    }

    fn is_mobile_expanded(&self) -> bool {
        has_class(&self.sidebar, "expanded")
    }

    fn set_mobile_expanded(&self, expanded: bool) {
        set_class(&self.sidebar, "expanded", expanded);
        set_class(&self.body, "sidebar-active", expanded);
    }

    fn current_path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn link_hrefs(&self) -> Vec<String> {
        menu_links(&self.document)
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect()
    }

    fn mark_link_active(&self, index: usize) {
        if let Some(link) = menu_links(&self.document).get(index) {
            set_class(link, "active", true);
        }
    }
}

fn menu_links(document: &Document) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(MENU_LINK_SELECTOR) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
