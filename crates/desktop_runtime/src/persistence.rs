//! Persistent State Store: per-slice layout persistence over host preference storage.
//!
//! Every slice loads independently. A missing, unreadable, or corrupt slice falls back to its
//! empty default without affecting the others, and failed writes are logged and dropped.

use std::rc::Rc;

use platform_host::{load_pref_with, save_pref_with, PrefsStore};
use serde::{de::DeserializeOwned, Serialize};

use crate::model::{DesktopState, PersistedSnapshot};

/// Window id to last committed geometry.
pub const WINDOW_POSITIONS_KEY: &str = "xp-window-positions";
/// Window id to open/minimized/maximized flags.
pub const WINDOW_STATES_KEY: &str = "xp-window-states";
/// Stacking order, back to front.
pub const WINDOW_Z_ORDER_KEY: &str = "xp-window-zorder";
/// Taskbar entry order, left to right.
pub const TASKBAR_ORDER_KEY: &str = "xp-taskbar-order";
/// Icon id to grid-snapped position.
pub const ICON_POSITIONS_KEY: &str = "xp-icon-positions";

/// Every key owned by the store, in the order slices are written.
pub const ALL_KEYS: [&str; 5] = [
    WINDOW_POSITIONS_KEY,
    WINDOW_STATES_KEY,
    WINDOW_Z_ORDER_KEY,
    TASKBAR_ORDER_KEY,
    ICON_POSITIONS_KEY,
];

#[derive(Clone)]
/// Fail-soft persistence of the desktop layout slices.
pub struct PersistentStateStore {
    prefs: Rc<dyn PrefsStore>,
}

impl PersistentStateStore {
    pub fn new(prefs: Rc<dyn PrefsStore>) -> Self {
        Self { prefs }
    }

    /// Loads one slice, substituting the default when it is absent or unreadable.
    pub fn load_slice<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match load_pref_with::<_, T>(self.prefs.as_ref(), key) {
            Ok(value) => value.unwrap_or_default(),
            Err(err) => {
                leptos::logging::warn!("discarding persisted slice `{key}`: {err}");
                T::default()
            }
        }
    }

    /// Writes one slice. Returns whether the write succeeded; failures are logged.
    pub fn save_slice<T: Serialize>(&self, key: &str, value: &T) -> bool {
        match save_pref_with(self.prefs.as_ref(), key, value) {
            Ok(()) => true,
            Err(err) => {
                leptos::logging::warn!("persisting slice `{key}` failed: {err}");
                false
            }
        }
    }

    /// Reads every slice independently.
    pub fn load_snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            window_positions: self.load_slice(WINDOW_POSITIONS_KEY),
            window_states: self.load_slice(WINDOW_STATES_KEY),
            z_order: self.load_slice(WINDOW_Z_ORDER_KEY),
            taskbar_order: self.load_slice(TASKBAR_ORDER_KEY),
            icon_positions: self.load_slice(ICON_POSITIONS_KEY),
        }
    }

    /// Writes window positions, window states, z-order, and taskbar order in one pass.
    pub fn persist_layout(&self, state: &DesktopState) {
        // Every slice is attempted even when an earlier write fails.
        let results = [
            self.save_slice(WINDOW_POSITIONS_KEY, &state.positions),
            self.save_slice(WINDOW_STATES_KEY, &state.window_states),
            self.save_slice(WINDOW_Z_ORDER_KEY, &state.z_order),
            self.save_slice(TASKBAR_ORDER_KEY, &state.taskbar_order),
        ];
        if results.contains(&false) {
            leptos::logging::debug_warn!("desktop layout persisted partially");
        }
    }

    pub fn persist_icon_layout(&self, state: &DesktopState) {
        self.save_slice(ICON_POSITIONS_KEY, &state.icon_positions);
    }

    /// Deletes every slice owned by the store.
    pub fn clear(&self) {
        for key in ALL_KEYS {
            if let Err(err) = self.prefs.delete_pref(key) {
                leptos::logging::warn!("clearing persisted slice `{key}` failed: {err}");
            }
        }
    }
}
