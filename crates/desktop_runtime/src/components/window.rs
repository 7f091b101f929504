use super::*;
use crate::model::WindowRecord;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn window_style(win: &WindowRecord) -> String {
    let display = if win.minimized { "display:none;" } else { "" };
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};{}",
        win.rect.x, win.rect.y, win.rect.w, win.rect.h, win.z_index, display
    )
}

fn window_class(win: &WindowRecord) -> String {
    let minimized_class = if win.minimized { " minimized" } else { "" };
    let maximized_class = if win.maximized { " maximized" } else { "" };
    format!("desktop-window{minimized_class}{maximized_class}")
}

#[component]
pub(super) fn DesktopWindow(
    window_id: WindowId,
    window_content: Option<Callback<WindowId, View>>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let id = store_value(window_id.clone());

    let window = create_memo(move |_| {
        runtime
            .state
            .with(|desktop| id.with_value(|window_id| desktop.window(window_id).cloned()))
    });
    let is_active = create_memo(move |_| {
        runtime.state.with(|desktop| {
            id.with_value(|window_id| desktop.active_window.as_ref() == Some(window_id))
        })
    });
    let is_maximized = move || window.with(|win| win.as_ref().is_some_and(|w| w.maximized));

    let focus = move |_| {
        if !is_active.get_untracked() {
            runtime.dispatch_action(DesktopAction::FocusWindow {
                window_id: id.get_value(),
            });
        }
    };
    let minimize = move || {
        runtime.dispatch_action(DesktopAction::MinimizeWindow {
            window_id: id.get_value(),
        })
    };
    let close = move || {
        runtime.dispatch_action(DesktopAction::CloseWindow {
            window_id: id.get_value(),
        })
    };
    let toggle_maximize = move || {
        runtime.dispatch_action(DesktopAction::ToggleMaximize {
            window_id: id.get_value(),
            viewport: runtime.viewport(),
        })
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id: id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let begin_resize = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id: id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let swallow_pointer = move |ev: web_sys::PointerEvent| {
        ev.prevent_default();
        ev.stop_propagation();
    };

    let title = window
        .with_untracked(|win| win.as_ref().map(|w| w.title.clone()))
        .unwrap_or_else(|| window_id.to_string());
    let body = window_content.map(|content| content.call(window_id.clone()));

    view! {
        <section
            id=window_id.dom_id()
            class=move || window.with(|win| win.as_ref().map(window_class).unwrap_or_default())
            style=move || window.with(|win| win.as_ref().map(window_style).unwrap_or_default())
            on:pointerdown=focus
            role="dialog"
            aria-label=title.clone()
        >
            <header
                class=move || if is_active.get() { "titlebar active" } else { "titlebar inactive" }
                on:pointerdown=begin_move
                on:dblclick=move |ev| {
                    stop_mouse_event(&ev);
                    toggle_maximize();
                }
            >
                <span class="titlebar-title">{title}</span>
                <div class="titlebar-controls">
                    <button
                        class="window-control minimize"
                        aria-label="Minimize window"
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            minimize();
                        }
                    >
                        "_"
                    </button>
                    <button
                        class="window-control maximize"
                        aria-label=move || if is_maximized() { "Restore window" } else { "Maximize window" }
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            toggle_maximize();
                        }
                    >
                        "□"
                    </button>
                    <button
                        class="window-control close"
                        aria-label="Close window"
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            close();
                        }
                    >
                        "×"
                    </button>
                </div>
            </header>
            <div class="window-body">{body}</div>
            <Show when=move || !is_maximized() fallback=|| ()>
                <div class="window-resize-handle" aria-hidden="true" on:pointerdown=begin_resize />
            </Show>
        </section>
    }
}
