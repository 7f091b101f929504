//! Desktop icon placement on a fixed-origin grid.

use crate::model::{DesktopState, IconPosition, PointerPosition, Viewport};

/// Top-left point of the icon lattice.
pub const ICON_GRID_ORIGIN: IconPosition = IconPosition { x: 20, y: 20 };
/// Spacing of the icon lattice in both axes.
pub const ICON_GRID_SIZE: i32 = 100;
/// Square footprint of one icon; drags keep the whole footprint on the desktop.
pub const ICON_SIZE_PX: i32 = 72;
/// Press duration before an icon press becomes a drag instead of a click.
pub const ICON_HOLD_DELAY_MS: u64 = 180;

/// Snaps a position to the nearest lattice point, independently per axis.
pub fn snap_to_grid(position: IconPosition) -> IconPosition {
    IconPosition {
        x: snap_axis(position.x, ICON_GRID_ORIGIN.x),
        y: snap_axis(position.y, ICON_GRID_ORIGIN.y),
    }
}

fn snap_axis(value: i32, origin: i32) -> i32 {
    let cells = (f64::from(value - origin) / f64::from(ICON_GRID_SIZE)).round() as i32;
    cells * ICON_GRID_SIZE + origin
}

/// Keeps an icon footprint inside the desktop area above the taskbar.
pub fn clamp_to_desktop(position: IconPosition, viewport: Viewport) -> IconPosition {
    let desktop = viewport.desktop_rect();
    IconPosition {
        x: position.x.clamp(0, (desktop.w - ICON_SIZE_PX).max(0)),
        y: position.y.clamp(0, (desktop.h - ICON_SIZE_PX).max(0)),
    }
}

/// Position of `pointer` minus the press offset, clamped to the desktop.
pub fn drag_position(
    pointer: PointerPosition,
    offset: PointerPosition,
    viewport: Viewport,
) -> IconPosition {
    clamp_to_desktop(
        IconPosition {
            x: pointer.x - offset.x,
            y: pointer.y - offset.y,
        },
        viewport,
    )
}

/// Remembered position of an icon, falling back to its catalog slot.
pub fn icon_position(state: &DesktopState, icon_id: &str) -> Option<IconPosition> {
    state.icon_positions.get(icon_id).copied().or_else(|| {
        state
            .catalog
            .icon(icon_id)
            .map(|icon| icon.default_position)
    })
}
