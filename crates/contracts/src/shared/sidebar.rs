/// localStorage key of the site-wide collapsed flag
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";

/// Widths at or below this are treated as mobile
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ViewportMode {
    Mobile,
    Desktop,
}

impl ViewportMode {
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width <= breakpoint {
            ViewportMode::Mobile
        } else {
            ViewportMode::Desktop
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, ViewportMode::Mobile)
    }
}

/// Stored as the strings `"true"` / `"false"`
pub fn encode_collapsed(collapsed: bool) -> &'static str {
    if collapsed {
        "true"
    } else {
        "false"
    }
}

/// Anything other than `"true"` (including a missing value) reads as expanded
pub fn decode_collapsed(stored: Option<&str>) -> bool {
    stored == Some("true")
}

/// A menu link is active on its own path and on every path below it.
/// The root link only matches the root path itself.
pub fn link_is_active(current_path: &str, href: &str) -> bool {
    if href.is_empty() {
        return false;
    }
    current_path == href || (href != "/" && current_path.starts_with(href))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_breakpoint() {
        assert_eq!(ViewportMode::from_width(768.0, MOBILE_BREAKPOINT_PX), ViewportMode::Mobile);
        assert_eq!(ViewportMode::from_width(769.0, MOBILE_BREAKPOINT_PX), ViewportMode::Desktop);
        assert!(ViewportMode::from_width(320.0, MOBILE_BREAKPOINT_PX).is_mobile());
    }

    #[test]
    fn test_collapsed_flag_encoding() {
        assert_eq!(encode_collapsed(true), "true");
        assert_eq!(encode_collapsed(false), "false");
        assert!(decode_collapsed(Some("true")));
        assert!(!decode_collapsed(Some("false")));
        assert!(!decode_collapsed(Some("TRUE")));
        assert!(!decode_collapsed(None));
    }

    #[test]
    fn test_prefix_link_is_active() {
        assert!(link_is_active("/invoices/5", "/invoices"));
        assert!(link_is_active("/invoices", "/invoices"));
        assert!(!link_is_active("/quotations/1", "/invoices"));
    }

    #[test]
    fn test_root_link_only_matches_root() {
        assert!(link_is_active("/", "/"));
        assert!(!link_is_active("/invoices/5", "/"));
    }

    #[test]
    fn test_empty_href_never_active() {
        assert!(!link_is_active("/invoices", ""));
    }
}
