//! Shared window-manager transition helpers used by the desktop reducer.

use crate::model::{DesktopState, PointerPosition, ResizeSession, Viewport, WindowId, WindowRect};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 200;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 100;
/// z-index assigned below the first restored window.
pub const Z_INDEX_BASE: u32 = 100;

/// Shrinks a default geometry so it fits the viewport minus margin and taskbar.
///
/// Only the size is clamped; the default position is kept as-is.
pub fn fit_default_rect(rect: WindowRect, viewport: Viewport) -> WindowRect {
    WindowRect {
        w: rect.w.min(viewport.max_right()),
        h: rect.h.min(viewport.max_bottom()),
        ..rect
    }
}

/// Full-desktop geometry used while a window is maximized.
pub fn maximized_rect(viewport: Viewport) -> WindowRect {
    viewport.desktop_rect()
}

/// Position of a dragged window: pointer minus press offset, top edge kept non-negative.
pub fn dragged_rect(rect: WindowRect, pointer: PointerPosition, offset: PointerPosition) -> WindowRect {
    WindowRect {
        x: pointer.x - offset.x,
        y: (pointer.y - offset.y).max(0),
        ..rect
    }
}

/// Size of a window being resized, floored at the minimum and capped by the viewport.
pub fn resized_rect(
    rect: WindowRect,
    session: &ResizeSession,
    pointer: PointerPosition,
    viewport: Viewport,
) -> WindowRect {
    let w = session.width_start + pointer.x - session.pointer_start.x;
    let h = session.height_start + pointer.y - session.pointer_start.y;
    WindowRect {
        w: w.min(viewport.max_right()).max(MIN_WINDOW_WIDTH),
        h: h.min(viewport.max_bottom()).max(MIN_WINDOW_HEIGHT),
        ..rect
    }
}

/// Corrects `rect` after a viewport change. Returns `None` when no correction is needed.
///
/// Oversized windows shrink to the available area first, then any edge outside the area is
/// translated back inside.
pub fn reflow_rect(rect: WindowRect, viewport: Viewport) -> Option<WindowRect> {
    let max_right = viewport.max_right();
    let max_bottom = viewport.max_bottom();

    let mut next = rect;
    next.w = next.w.min(max_right);
    next.h = next.h.min(max_bottom);
    if next.right() > max_right {
        next.x = (max_right - next.w).max(0);
    }
    if next.bottom() > max_bottom {
        next.y = (max_bottom - next.h).max(0);
    }
    next.x = next.x.max(0);
    next.y = next.y.max(0);

    (next != rect).then_some(next)
}

/// Raises `window_id` above every tracked window and makes it the active window.
///
/// Returns `false` when the window is not open.
pub fn focus_window_internal(state: &mut DesktopState, window_id: &WindowId) -> bool {
    let Some(window) = state.windows.get_mut(window_id) else {
        return false;
    };
    state.z_counter = state.z_counter.saturating_add(1);
    window.z_index = state.z_counter;
    state.z_order.retain(|id| id != window_id);
    state.z_order.push(window_id.clone());
    state.active_window = Some(window_id.clone());
    true
}

/// Reassigns z-indices as a strictly increasing sequence along the z-order, starting above
/// [`Z_INDEX_BASE`], and resets the focus counter to the topmost value.
pub fn restack_from_z_order(state: &mut DesktopState) {
    let mut z = Z_INDEX_BASE;
    for window_id in &state.z_order {
        if let Some(window) = state.windows.get_mut(window_id) {
            z += 1;
            window.z_index = z;
        }
    }
    state.z_counter = z;
}

/// Keeps exactly one active window when any is visible: the current one if still visible,
/// otherwise the frontmost visible window.
pub fn normalize_active_window(state: &mut DesktopState) {
    let current_visible = state
        .active_window
        .as_ref()
        .and_then(|id| state.windows.get(id))
        .is_some_and(|w| w.is_visible());
    if !current_visible {
        state.active_window = state.frontmost_visible().cloned();
    }
}
