//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! Reducer semantics stay pure; storage writes, timers, observer delivery, and viewport/URL
//! queries live behind this boundary so tests can inject an in-memory preference store.

mod host_ui;

use std::rc::Rc;

use leptos::{logging, SignalWithUntracked};
use platform_host::PrefsStore;
use platform_host_web::{host_strategy_name, prefs_store};

use crate::{
    model::{DeepLinkState, DesktopEvent, Viewport},
    persistence::PersistentStateStore,
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

/// Receiver for desktop lifecycle notifications.
///
/// Delivery is fire-and-forget: observers cannot veto or alter the transition that produced the
/// event.
pub trait DesktopObserver {
    fn on_event(&self, event: &DesktopEvent);
}

impl<F> DesktopObserver for F
where
    F: Fn(&DesktopEvent),
{
    fn on_event(&self, event: &DesktopEvent) {
        self(event)
    }
}

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    store: PersistentStateStore,
    observers: Vec<Rc<dyn DesktopObserver>>,
    host_strategy_name: &'static str,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self {
            store: PersistentStateStore::new(Rc::new(prefs_store())),
            observers: Vec::new(),
            host_strategy_name: host_strategy_name(),
        }
    }
}

impl DesktopHostContext {
    /// Builds a host bundle over an explicit preference store.
    pub fn new(prefs: Rc<dyn PrefsStore>) -> Self {
        Self {
            store: PersistentStateStore::new(prefs),
            ..Self::default()
        }
    }

    /// Registers an observer for [`DesktopEvent`] notifications.
    pub fn with_observer(mut self, observer: Rc<dyn DesktopObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Returns the layout persistence store.
    pub fn state_store(&self) -> &PersistentStateStore {
        &self.store
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy_name
    }

    /// Returns the current viewport, including the taskbar reservation.
    pub fn desktop_viewport(&self) -> Viewport {
        host_ui::desktop_viewport()
    }

    /// Returns windows requested through the page URL.
    pub fn deep_link(&self) -> DeepLinkState {
        DeepLinkState::from_query(&host_ui::location_search())
    }

    /// Hydrates persisted layout, then opens deep-linked windows through the normal open command.
    pub fn install_boot_hydration(&self, runtime: DesktopRuntimeContext) {
        let viewport = self.desktop_viewport();
        let snapshot = self.store.load_snapshot();
        logging::log!(
            "desktop boot via {} host: {} saved window states, {} saved icon positions",
            self.host_strategy_name,
            snapshot.window_states.len(),
            snapshot.icon_positions.len()
        );
        runtime.dispatch_action(DesktopAction::HydrateSnapshot { snapshot, viewport });

        for window_id in self.deep_link().open {
            runtime.dispatch_action(DesktopAction::OpenWindow {
                window_id,
                viewport,
            });
        }
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistLayout => runtime
                .state
                .with_untracked(|state| self.store.persist_layout(state)),
            RuntimeEffect::PersistIconLayout => runtime
                .state
                .with_untracked(|state| self.store.persist_icon_layout(state)),
            RuntimeEffect::ClearPersistedState => self.store.clear(),
            RuntimeEffect::ScheduleIconHold { icon_id, press_id } => {
                host_ui::schedule_icon_hold(runtime, icon_id, press_id)
            }
            RuntimeEffect::Notify(event) => self.notify_observers(&event),
        }
    }

    /// Delivers `event` to every registered observer in registration order.
    pub fn notify_observers(&self, event: &DesktopEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}
