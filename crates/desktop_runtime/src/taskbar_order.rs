//! Taskbar entry ordering, independent of the stacking order.

use serde::{Deserialize, Serialize};

use crate::model::WindowId;

/// Where a dragged taskbar entry lands relative to the hovered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropPlacement {
    Before,
    After,
}

impl DropPlacement {
    /// Resolves the placement from the pointer's x against the hovered entry's midpoint.
    pub fn from_pointer(pointer_x: f64, entry_left: f64, entry_width: f64) -> Self {
        if pointer_x < entry_left + entry_width / 2.0 {
            Self::Before
        } else {
            Self::After
        }
    }
}

/// Appends `window_id` unless it already has an entry.
pub fn add_entry(order: &mut Vec<WindowId>, window_id: &WindowId) -> bool {
    if order.contains(window_id) {
        return false;
    }
    order.push(window_id.clone());
    true
}

pub fn remove_entry(order: &mut Vec<WindowId>, window_id: &WindowId) -> bool {
    let before = order.len();
    order.retain(|id| id != window_id);
    order.len() != before
}

/// Moves `dragged` next to `target`. Returns `false` (order untouched) when the drop is onto
/// itself or either entry is missing.
pub fn move_entry(
    order: &mut Vec<WindowId>,
    dragged: &WindowId,
    target: &WindowId,
    placement: DropPlacement,
) -> bool {
    if dragged == target || !order.contains(dragged) || !order.contains(target) {
        return false;
    }
    order.retain(|id| id != dragged);
    let Some(target_index) = order.iter().position(|id| id == target) else {
        return false;
    };
    let insert_at = match placement {
        DropPlacement::Before => target_index,
        DropPlacement::After => target_index + 1,
    };
    order.insert(insert_at, dragged.clone());
    true
}

/// Rebuilds an order from a saved list: saved ids that are still open come first in their saved
/// order, then any open ids the saved list did not mention, in `open` order.
pub fn merge_saved_order(saved: &[WindowId], open: &[WindowId]) -> Vec<WindowId> {
    let mut order = Vec::with_capacity(open.len());
    for id in saved {
        if open.contains(id) && !order.contains(id) {
            order.push(id.clone());
        }
    }
    for id in open {
        if !order.contains(id) {
            order.push(id.clone());
        }
    }
    order
}
