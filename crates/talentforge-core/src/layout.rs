//! Sidebar state and the layout it implies.

/// Header title offset while the sidebar is collapsed, in layout units.
pub const COLLAPSED_TITLE_OFFSET: u16 = 96;

/// Presence of each layout class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutClasses {
    pub sidebar_collapsed: bool,
    pub main_sidebar_open: bool,
    pub main_sidebar_closed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutController {
    sidebar_open: bool,
}

impl Default for LayoutController {
    fn default() -> Self {
        Self { sidebar_open: true }
    }
}

impl LayoutController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn toggle(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        tracing::debug!(open = self.sidebar_open, "sidebar toggled");
    }

    pub fn classes(&self) -> LayoutClasses {
        LayoutClasses {
            sidebar_collapsed: !self.sidebar_open,
            main_sidebar_open: self.sidebar_open,
            main_sidebar_closed: !self.sidebar_open,
        }
    }

    pub fn header_title_offset(&self) -> u16 {
        if self.sidebar_open {
            0
        } else {
            COLLAPSED_TITLE_OFFSET
        }
    }
}
