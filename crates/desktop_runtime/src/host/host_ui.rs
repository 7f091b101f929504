use std::time::Duration;

use leptos::set_timeout;

use crate::{
    desktop_icons::ICON_HOLD_DELAY_MS,
    model::{Viewport, TASKBAR_HEIGHT_PX},
    reducer::DesktopAction,
    runtime_context::DesktopRuntimeContext,
};

pub(super) fn schedule_icon_hold(runtime: DesktopRuntimeContext, icon_id: String, press_id: u64) {
    set_timeout(
        move || runtime.dispatch_action(DesktopAction::IconHoldElapsed { icon_id, press_id }),
        Duration::from_millis(ICON_HOLD_DELAY_MS),
    );
}

pub(super) fn desktop_viewport() -> Viewport {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(1024);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(768);

            return Viewport::new(width, height, TASKBAR_HEIGHT_PX);
        }
    }

    Viewport::new(1024, 768, TASKBAR_HEIGHT_PX)
}

pub(super) fn location_search() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            return window.location().search().unwrap_or_default();
        }
    }

    String::new()
}
