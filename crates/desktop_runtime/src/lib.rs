//! Desktop window manager runtime: state model, reducer, persistence, and Leptos shell.

pub mod catalog;
pub mod components;
pub mod desktop_icons;
pub mod effect_executor;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod taskbar_order;
pub mod window_manager;

pub use catalog::{IconDefinition, WindowCatalog, WindowDefinition};
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use host::{DesktopHostContext, DesktopObserver};
pub use model::*;
pub use persistence::PersistentStateStore;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
