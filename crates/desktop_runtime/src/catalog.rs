//! Static window and desktop-icon tables for the portfolio desktop.
//!
//! The catalog stands in for the markup the shell renders: a window id that is not listed here
//! has no element, and commands that target it are ignored.

use crate::{
    desktop_icons::{ICON_GRID_ORIGIN, ICON_GRID_SIZE},
    model::{IconPosition, WindowId, WindowRect},
};

/// Geometry used for windows without an entry in the default table.
pub const FALLBACK_WINDOW_RECT: WindowRect = WindowRect::new(100, 100, 500, 400);
const ICONS_PER_COLUMN: i32 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDefinition {
    pub id: WindowId,
    pub title: String,
    pub default_rect: WindowRect,
    /// Opened on first boot, when no persisted state says otherwise.
    pub starter: bool,
}

impl WindowDefinition {
    pub fn new(id: &str, title: &str, default_rect: WindowRect) -> Self {
        Self {
            id: WindowId::from(id),
            title: title.to_string(),
            default_rect,
            starter: false,
        }
    }

    pub fn starter(mut self) -> Self {
        self.starter = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDefinition {
    pub id: String,
    pub label: String,
    /// Window opened on double click.
    pub opens: WindowId,
    pub default_position: IconPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowCatalog {
    pub windows: Vec<WindowDefinition>,
    pub icons: Vec<IconDefinition>,
}

impl WindowCatalog {
    /// Builds a catalog from window definitions without desktop icons.
    pub fn new(windows: Vec<WindowDefinition>) -> Self {
        Self {
            windows,
            icons: Vec::new(),
        }
    }

    /// Adds desktop icons laid out top-to-bottom, then left-to-right on the icon grid.
    pub fn with_icons(mut self, icons: &[(&str, &str, &str)]) -> Self {
        self.icons = icons
            .iter()
            .enumerate()
            .map(|(index, (id, label, opens))| IconDefinition {
                id: (*id).to_string(),
                label: (*label).to_string(),
                opens: WindowId::from(*opens),
                default_position: default_icon_slot(index as i32),
            })
            .collect();
        self
    }

    /// The portfolio desktop shipped by the site.
    pub fn portfolio() -> Self {
        Self::new(vec![
            WindowDefinition::new("about", "About Me", WindowRect::new(300, 20, 780, 800)).starter(),
            WindowDefinition::new("contact", "Contact Me", WindowRect::new(950, 120, 525, 550))
                .starter(),
            WindowDefinition::new("project1", "BetaBreak", WindowRect::new(180, 80, 550, 735)),
            WindowDefinition::new("project2", "StormE", WindowRect::new(220, 120, 1000, 425)),
            WindowDefinition::new("project3", "AI Assistant", WindowRect::new(260, 160, 925, 630)),
            WindowDefinition::new("project4", "CyberPaper", WindowRect::new(300, 200, 250, 500)),
            WindowDefinition::new("contactinfo", "Contact Info.txt", FALLBACK_WINDOW_RECT),
            WindowDefinition::new("explorer", "My Documents", FALLBACK_WINDOW_RECT),
            WindowDefinition::new("recyclebin", "Recycle Bin", FALLBACK_WINDOW_RECT),
            WindowDefinition::new("docviewer", "Document Viewer", FALLBACK_WINDOW_RECT),
            WindowDefinition::new("quest", "Portfolio Quest", WindowRect::new(515, 150, 410, 560)),
        ])
        .with_icons(&[
            ("about", "About Me", "about"),
            ("contact", "Contact Me", "contact"),
            ("project1", "BetaBreak", "project1"),
            ("project2", "StormE", "project2"),
            ("project3", "AI Assistant", "project3"),
            ("project4", "CyberPaper", "project4"),
            ("my-documents", "My Documents", "explorer"),
            ("recycle-bin", "Recycle Bin", "recyclebin"),
            ("my-computer", "Portfolio Quest", "quest"),
        ])
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowDefinition> {
        self.windows.iter().find(|def| def.id == *window_id)
    }

    pub fn contains(&self, window_id: &WindowId) -> bool {
        self.window(window_id).is_some()
    }

    pub fn icon(&self, icon_id: &str) -> Option<&IconDefinition> {
        self.icons.iter().find(|icon| icon.id == icon_id)
    }

    /// Default geometry for `window_id`, or the fallback rect for unlisted ids.
    pub fn default_rect(&self, window_id: &WindowId) -> WindowRect {
        self.window(window_id)
            .map(|def| def.default_rect)
            .unwrap_or(FALLBACK_WINDOW_RECT)
    }

    pub fn title(&self, window_id: &WindowId) -> String {
        self.window(window_id)
            .map(|def| def.title.clone())
            .unwrap_or_else(|| window_id.to_string())
    }
}

fn default_icon_slot(index: i32) -> IconPosition {
    IconPosition {
        x: ICON_GRID_ORIGIN.x + (index / ICONS_PER_COLUMN) * ICON_GRID_SIZE,
        y: ICON_GRID_ORIGIN.y + (index % ICONS_PER_COLUMN) * ICON_GRID_SIZE,
    }
}
