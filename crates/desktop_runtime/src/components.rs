//! Desktop shell UI composition and interaction surfaces.

mod icon_grid;
mod taskbar;
mod window;

use leptos::*;

use self::{icon_grid::DesktopIconGrid, taskbar::Taskbar, window::DesktopWindow};
use crate::{
    model::{InteractionState, PointerPosition, WindowId},
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the full desktop shell UI: icons, the window layer, and the taskbar.
pub fn DesktopShell(
    /// Renders the body of a window; windows show only their title bar chrome when omitted.
    #[prop(optional)]
    window_content: Option<Callback<WindowId, View>>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.key() != "Escape" {
            return;
        }
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::CloseFrontmostWindow);
    });

    // Pointer tracking is global so a release anywhere ends the active interaction.
    let move_listener =
        window_event_listener(ev::pointermove, move |ev| track_pointer(runtime, &ev));
    let up_listener =
        window_event_listener(ev::pointerup, move |_| end_active_pointer_interaction(runtime));
    let cancel_listener = window_event_listener(ev::pointercancel, move |_| {
        end_active_pointer_interaction(runtime)
    });
    let resize_listener = window_event_listener(ev::resize, move |_| {
        runtime.dispatch_action(DesktopAction::ReflowViewport {
            viewport: runtime.viewport(),
        });
    });
    on_cleanup(move || {
        escape_listener.remove();
        move_listener.remove();
        up_listener.remove();
        cancel_listener.remove();
        resize_listener.remove();
    });

    view! {
        <div id="desktop-shell-root" class="desktop-shell" tabindex="-1">
            <div
                class="desktop"
                on:click=move |_| runtime.dispatch_action(DesktopAction::SelectIcon { icon_id: None })
            >
                <DesktopIconGrid />
                <div class="desktop-window-layer">
                    <For
                        each=move || state.with(|desktop| desktop.windows.keys().cloned().collect::<Vec<_>>())
                        key=|window_id| window_id.clone()
                        let:window_id
                    >
                        <DesktopWindow window_id window_content />
                    </For>
                </div>
            </div>

            <Taskbar />
        </div>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Primary-button presses only; touch and pen must be the primary pointer.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn track_pointer(runtime: DesktopRuntimeContext, ev: &web_sys::PointerEvent) {
    let (dragging, resizing, icon_dragging) = runtime.interaction.with_untracked(|interaction| {
        (
            interaction.dragging.is_some(),
            interaction.resizing.is_some(),
            interaction.icon_drag.is_some(),
        )
    });
    if !(dragging || resizing || icon_dragging) {
        return;
    }

    let pointer = pointer_from_pointer_event(ev);
    if dragging {
        runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
    }
    if resizing {
        runtime.dispatch_action(DesktopAction::UpdateResize {
            pointer,
            viewport: runtime.viewport(),
        });
    }
    if icon_dragging {
        runtime.dispatch_action(DesktopAction::UpdateIconDrag {
            pointer,
            viewport: runtime.viewport(),
        });
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    if !runtime.interaction.with_untracked(InteractionState::is_idle) {
        runtime.dispatch_action(DesktopAction::ReleasePointer);
    }
}
