//! Responsive layout state derived from the viewport width.

use serde::Serialize;

/// How the teacher list is rendered.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    Cards,
    Table,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(skip)]
    breakpoint: u32,
    pub viewport_width: u32,
    pub is_mobile: bool,
    pub sidebar_open: bool,
    pub filter_panel_open: bool,
    pub profile_dropdown_open: bool,
    pub list_mode: ListMode,
}

impl Layout {
    /// Starts at desktop width.
    pub fn new(breakpoint: u32) -> Self {
        let mut layout = Self {
            breakpoint,
            viewport_width: breakpoint,
            is_mobile: false,
            sidebar_open: false,
            filter_panel_open: false,
            profile_dropdown_open: false,
            list_mode: ListMode::Table,
        };
        layout.resize(breakpoint);
        layout
    }

    /// Recompute the mobile flag. The sidebar closes on any non-mobile width.
    pub fn resize(&mut self, width: u32) {
        self.viewport_width = width;
        self.is_mobile = width < self.breakpoint;
        if !self.is_mobile {
            self.sidebar_open = false;
        }
        self.list_mode = if self.is_mobile {
            ListMode::Cards
        } else {
            ListMode::Table
        };
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn toggle_filter_panel(&mut self) {
        self.filter_panel_open = !self.filter_panel_open;
    }

    pub fn toggle_profile_dropdown(&mut self) {
        self.profile_dropdown_open = !self.profile_dropdown_open;
    }

    pub fn close_profile_dropdown(&mut self) {
        self.profile_dropdown_open = false;
    }

    /// A pointer-down outside the profile menu.
    pub fn outside_click(&mut self) {
        self.close_profile_dropdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_desktop() {
        let layout = Layout::new(768);
        assert!(!layout.is_mobile);
        assert_eq!(layout.list_mode, ListMode::Table);
        assert!(!layout.sidebar_open);
    }

    #[test]
    fn test_breakpoint_is_exclusive() {
        let mut layout = Layout::new(768);
        layout.resize(767);
        assert!(layout.is_mobile);
        assert_eq!(layout.list_mode, ListMode::Cards);
        layout.resize(768);
        assert!(!layout.is_mobile);
    }

    #[test]
    fn test_sidebar_closes_when_leaving_mobile() {
        let mut layout = Layout::new(768);
        layout.resize(400);
        layout.toggle_sidebar();
        assert!(layout.sidebar_open);

        layout.resize(500);
        assert!(layout.sidebar_open);

        layout.resize(1024);
        assert!(!layout.sidebar_open);
    }

    #[test]
    fn test_outside_click_closes_dropdown_only() {
        let mut layout = Layout::new(768);
        layout.toggle_profile_dropdown();
        layout.toggle_filter_panel();
        layout.outside_click();

        assert!(!layout.profile_dropdown_open);
        assert!(layout.filter_panel_open);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Layout::new(768)).unwrap();
        assert_eq!(json["viewportWidth"], 768);
        assert_eq!(json["listMode"], "table");
        assert!(json.get("breakpoint").is_none());
    }
}
