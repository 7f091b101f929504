use std::time::Duration;

use super::*;
use crate::{model::DesktopState, taskbar_order::DropPlacement};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaskbarClockSnapshot {
    hour: u32,
    minute: u32,
}

impl TaskbarClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self { hour: 0, minute: 0 }
        }
    }
}

fn format_taskbar_clock_time(snapshot: TaskbarClockSnapshot) -> String {
    let mut hour = snapshot.hour % 12;
    if hour == 0 {
        hour = 12;
    }
    let suffix = if snapshot.hour >= 12 { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour, snapshot.minute, suffix)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TaskbarEntry {
    window_id: WindowId,
    title: String,
    active: bool,
    minimized: bool,
}

/// Entries in taskbar order; ids without an open window are skipped.
fn taskbar_entries(state: &DesktopState) -> Vec<TaskbarEntry> {
    state
        .taskbar_order
        .iter()
        .filter_map(|window_id| state.window(window_id))
        .map(|win| TaskbarEntry {
            window_id: win.id.clone(),
            title: win.title.clone(),
            active: state.active_window.as_ref() == Some(&win.id),
            minimized: win.minimized,
        })
        .collect()
}

fn drop_placement(ev: &web_sys::DragEvent) -> DropPlacement {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(target) = ev.current_target() {
            if let Ok(element) = target.dyn_into::<web_sys::Element>() {
                let bounds = element.get_bounding_client_rect();
                return DropPlacement::from_pointer(
                    f64::from(ev.client_x()),
                    bounds.left(),
                    bounds.width(),
                );
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = ev;

    DropPlacement::After
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let clock_now = create_rw_signal(TaskbarClockSnapshot::now());
    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(TaskbarClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let dragged_entry = create_rw_signal(None::<WindowId>);
    let entries = create_memo(move |_| state.with(taskbar_entries));

    view! {
        <footer class="taskbar" role="toolbar" aria-label="Taskbar">
            <button
                class="start-button"
                aria-label="Start: reset desktop"
                on:click=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_action(DesktopAction::ResetDesktop {
                        viewport: runtime.viewport(),
                    });
                }
            >
                "start"
            </button>
            <div class="taskbar-entries">
                <For each=move || entries.get() key=|entry| entry.clone() let:entry>
                    <TaskbarEntryButton entry dragged_entry />
                </For>
            </div>
            <div class="taskbar-clock">
                {move || format_taskbar_clock_time(clock_now.get())}
            </div>
        </footer>
    }
}

#[component]
fn TaskbarEntryButton(
    entry: TaskbarEntry,
    dragged_entry: RwSignal<Option<WindowId>>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let id = store_value(entry.window_id.clone());
    let class_name = format!(
        "taskbar-entry{}{}",
        if entry.active { " active" } else { "" },
        if entry.minimized { " minimized" } else { "" }
    );

    view! {
        <button
            class=class_name
            draggable="true"
            aria-pressed=entry.active.to_string()
            on:click=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::ActivateTaskbarEntry {
                    window_id: id.get_value(),
                });
            }
            on:dragstart=move |ev: web_sys::DragEvent| {
                dragged_entry.set(Some(id.get_value()));
                if let Some(data) = ev.data_transfer() {
                    data.set_effect_allowed("move");
                    let _ = data.set_data("text/plain", id.with_value(|window_id| window_id.to_string()).as_str());
                }
            }
            on:dragover=move |ev: web_sys::DragEvent| {
                if dragged_entry.get_untracked().is_some() {
                    ev.prevent_default();
                }
            }
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                let Some(dragged) = dragged_entry.get_untracked() else {
                    return;
                };
                dragged_entry.set(None);
                runtime.dispatch_action(DesktopAction::ReorderTaskbar {
                    dragged,
                    target: id.get_value(),
                    placement: drop_placement(&ev),
                });
            }
            on:dragend=move |_| dragged_entry.set(None)
        >
            {entry.title}
        </button>
    }
}
