use super::*;
use crate::{
    catalog::IconDefinition,
    desktop_icons::{icon_position, ICON_SIZE_PX},
    model::{DesktopState, IconPosition},
};

/// Where an icon is drawn: the live drag position while it is being dragged, otherwise its
/// remembered or default slot.
fn displayed_icon_position(
    state: &DesktopState,
    interaction: &InteractionState,
    icon_id: &str,
) -> Option<IconPosition> {
    interaction
        .icon_drag
        .as_ref()
        .filter(|drag| drag.icon_id == icon_id)
        .map(|drag| drag.position)
        .or_else(|| icon_position(state, icon_id))
}

#[component]
pub(super) fn DesktopIconGrid() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let icons = runtime
        .state
        .with_untracked(|desktop| desktop.catalog.icons.clone());

    view! {
        <div class="desktop-icons">
            {icons
                .into_iter()
                .map(|icon| view! { <DesktopIcon icon /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn DesktopIcon(icon: IconDefinition) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let id = store_value(icon.id.clone());

    let position = create_memo(move |_| {
        runtime.state.with(|desktop| {
            runtime.interaction.with(|interaction| {
                id.with_value(|icon_id| displayed_icon_position(desktop, interaction, icon_id))
            })
        })
    });
    let is_selected = create_memo(move |_| {
        runtime.state.with(|desktop| {
            id.with_value(|icon_id| desktop.selected_icon.as_deref() == Some(icon_id.as_str()))
        })
    });
    let is_dragging = create_memo(move |_| {
        runtime.interaction.with(|interaction| {
            id.with_value(|icon_id| {
                interaction
                    .icon_drag
                    .as_ref()
                    .is_some_and(|drag| drag.icon_id == *icon_id)
            })
        })
    });

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::PressIcon {
            icon_id: id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <button
            class=move || {
                let selected = if is_selected.get() { " selected" } else { "" };
                let dragging = if is_dragging.get() { " dragging" } else { "" };
                format!("desktop-icon{selected}{dragging}")
            }
            style=move || {
                position
                    .get()
                    .map(|at| format!("left:{}px;top:{}px;width:{}px;", at.x, at.y, ICON_SIZE_PX))
                    .unwrap_or_default()
            }
            aria-label=icon.label.clone()
            on:pointerdown=on_pointerdown
            on:click=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::SelectIcon {
                    icon_id: Some(id.get_value()),
                });
            }
            on:dblclick=move |ev| {
                stop_mouse_event(&ev);
                runtime.dispatch_action(DesktopAction::ActivateIcon {
                    icon_id: id.get_value(),
                    viewport: runtime.viewport(),
                });
            }
        >
            <span class="desktop-icon-image" aria-hidden="true"></span>
            <span class="desktop-icon-label">{icon.label}</span>
        </button>
    }
}
