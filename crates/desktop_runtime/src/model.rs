use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::WindowCatalog;

/// Fixed spacing between the viewport edges and any managed window.
pub const VIEWPORT_MARGIN_PX: i32 = 20;
/// Height reserved for the taskbar at the bottom of the viewport.
pub const TASKBAR_HEIGHT_PX: i32 = 40;

/// Stable identifier of a window, matching the `window-<id>` naming convention of the shell.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// DOM id of the window element.
    pub fn dom_id(&self) -> String {
        format!("window-{}", self.0)
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Window geometry in viewport pixels. Persisted as `{x, y, width, height}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "width")]
    pub w: i32,
    #[serde(rename = "height")]
    pub h: i32,
}

impl WindowRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }
}

/// Browser viewport dimensions together with the taskbar height carved out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub taskbar_height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32, taskbar_height: i32) -> Self {
        Self {
            width,
            height,
            taskbar_height,
        }
    }

    /// Largest right edge a window may reach.
    pub fn max_right(self) -> i32 {
        (self.width - VIEWPORT_MARGIN_PX).max(0)
    }

    /// Largest bottom edge a window may reach.
    pub fn max_bottom(self) -> i32 {
        (self.height - VIEWPORT_MARGIN_PX - self.taskbar_height).max(0)
    }

    /// Desktop area above the taskbar, used for maximized windows and icon bounds.
    pub fn desktop_rect(self) -> WindowRect {
        WindowRect {
            x: 0,
            y: 0,
            w: self.width.max(0),
            h: (self.height - self.taskbar_height).max(0),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024, 768, TASKBAR_HEIGHT_PX)
    }
}

/// Persisted open/minimized/maximized flags for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowStateRecord {
    pub open: bool,
    #[serde(default)]
    pub minimized: bool,
    #[serde(default)]
    pub maximized: bool,
}

impl WindowStateRecord {
    pub const CLOSED: Self = Self {
        open: false,
        minimized: false,
        maximized: false,
    };
}

/// Registry entry for a logically open window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub rect: WindowRect,
    /// Geometry in effect before maximizing; present only while maximized.
    pub restore_rect: Option<WindowRect>,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
}

impl WindowRecord {
    pub fn is_visible(&self) -> bool {
        !self.minimized
    }

    /// Geometry worth remembering for the next open: the pre-maximize rect while maximized.
    pub fn remembered_rect(&self) -> WindowRect {
        if self.maximized {
            self.restore_rect.unwrap_or(self.rect)
        } else {
            self.rect
        }
    }

    pub fn state_record(&self) -> WindowStateRecord {
        WindowStateRecord {
            open: true,
            minimized: self.minimized,
            maximized: self.maximized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Grid-snapped desktop icon location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPosition {
    pub x: i32,
    pub y: i32,
}

/// Everything the window manager tracks, owned by one runtime context.
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    pub catalog: WindowCatalog,
    /// Open windows keyed by id.
    pub windows: BTreeMap<WindowId, WindowRecord>,
    /// Stacking order, last = frontmost.
    pub z_order: Vec<WindowId>,
    /// Left-to-right taskbar order.
    pub taskbar_order: Vec<WindowId>,
    /// Last committed geometry per window, kept across close.
    pub positions: BTreeMap<WindowId, WindowRect>,
    pub window_states: BTreeMap<WindowId, WindowStateRecord>,
    pub icon_positions: BTreeMap<String, IconPosition>,
    pub active_window: Option<WindowId>,
    pub selected_icon: Option<String>,
    /// Monotonic z-index counter; the next focus gets `z_counter + 1`.
    pub z_counter: u32,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::with_catalog(WindowCatalog::portfolio())
    }
}

impl DesktopState {
    pub fn with_catalog(catalog: WindowCatalog) -> Self {
        Self {
            catalog,
            windows: BTreeMap::new(),
            z_order: Vec::new(),
            taskbar_order: Vec::new(),
            positions: BTreeMap::new(),
            window_states: BTreeMap::new(),
            icon_positions: BTreeMap::new(),
            active_window: None,
            selected_icon: None,
            z_counter: crate::window_manager::Z_INDEX_BASE,
        }
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.get(window_id)
    }

    pub fn is_open(&self, window_id: &WindowId) -> bool {
        self.windows.contains_key(window_id)
    }

    /// Frontmost window that is not minimized.
    pub fn frontmost_visible(&self) -> Option<&WindowId> {
        self.z_order
            .iter()
            .rev()
            .find(|id| self.windows.get(*id).is_some_and(WindowRecord::is_visible))
    }

    pub fn snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            window_positions: self.positions.clone(),
            window_states: self.window_states.clone(),
            z_order: self.z_order.clone(),
            taskbar_order: self.taskbar_order.clone(),
            icon_positions: self.icon_positions.clone(),
        }
    }
}

/// Union of the persisted slices. Each slice loads independently.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub window_positions: BTreeMap<WindowId, WindowRect>,
    pub window_states: BTreeMap<WindowId, WindowStateRecord>,
    pub z_order: Vec<WindowId>,
    pub taskbar_order: Vec<WindowId>,
    pub icon_positions: BTreeMap<String, IconPosition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    /// Pointer offset from the window's top-left corner at press time.
    pub offset: PointerPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub width_start: i32,
    pub height_start: i32,
}

/// An icon press waiting for the hold delay before it turns into a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPress {
    pub icon_id: String,
    pub press_id: u64,
    pub offset: PointerPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDragSession {
    pub icon_id: String,
    pub offset: PointerPosition,
    /// Unsnapped position while the pointer moves.
    pub position: IconPosition,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
    pub icon_press: Option<IconPress>,
    pub icon_drag: Option<IconDragSession>,
    /// Last press id handed out; survives hydration so stale hold timers never match.
    pub press_counter: u64,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        self.dragging.is_none()
            && self.resizing.is_none()
            && self.icon_press.is_none()
            && self.icon_drag.is_none()
    }
}

/// Lifecycle notifications delivered to external observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesktopEvent {
    /// A window became open and visible (fresh open or restored from minimize).
    WindowShown(WindowId),
    /// The user reordered taskbar entries.
    TaskbarReordered,
}

/// Windows requested through the page URL (`?open=about,contact`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeepLinkState {
    pub open: Vec<WindowId>,
}

impl DeepLinkState {
    /// Parses a `location.search` string.
    pub fn from_query(query: &str) -> Self {
        let open = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .filter(|(key, _)| *key == "open")
            .flat_map(|(_, value)| value.split(','))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(WindowId::from)
            .collect();
        Self { open }
    }
}
