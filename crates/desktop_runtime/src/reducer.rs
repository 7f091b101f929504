//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use thiserror::Error;

use crate::{
    desktop_icons::{self, snap_to_grid},
    model::{
        DesktopEvent, DesktopState, DragSession, IconDragSession, IconPress, InteractionState,
        PersistedSnapshot, PointerPosition, ResizeSession, Viewport, WindowId, WindowRecord,
        WindowStateRecord,
    },
    taskbar_order::{self, DropPlacement},
    window_manager::{
        dragged_rect, fit_default_rect, focus_window_internal, maximized_rect,
        normalize_active_window, reflow_rect, resized_rect, restack_from_z_order,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Rebuild the session from persisted slices.
    HydrateSnapshot {
        /// Loaded slices; corrupt slices arrive as their empty defaults.
        snapshot: PersistedSnapshot,
        /// Viewport used to fit default and maximized geometry.
        viewport: Viewport,
    },
    /// Open a window, or restore/focus it when already open.
    OpenWindow {
        /// Window to open.
        window_id: WindowId,
        /// Viewport used to fit default geometry.
        viewport: Viewport,
    },
    /// Close a window, remembering its geometry.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Close the frontmost visible window.
    CloseFrontmostWindow,
    /// Hide a window while keeping it open.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Maximize a window, or restore it when already maximized.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
        /// Viewport to maximize into.
        viewport: Viewport,
    },
    /// Raise a window above all others and mark it active.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Taskbar entry click: restore when minimized, then focus.
    ActivateTaskbarEntry {
        /// Window associated with the entry.
        window_id: WindowId,
    },
    /// Title-bar press.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at press time.
        pointer: PointerPosition,
    },
    /// Pointer movement during a window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Resize-handle press.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Pointer position at press time.
        pointer: PointerPosition,
    },
    /// Pointer movement during a resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
        /// Viewport bounding the size.
        viewport: Viewport,
    },
    /// Pointer down on a desktop icon; becomes a drag after the hold delay.
    PressIcon {
        /// Icon pressed.
        icon_id: String,
        /// Pointer position at press time.
        pointer: PointerPosition,
    },
    /// The hold delay for an icon press ran out.
    IconHoldElapsed {
        /// Icon whose timer fired.
        icon_id: String,
        /// Press the timer was started for.
        press_id: u64,
    },
    /// Pointer movement during an icon drag.
    UpdateIconDrag {
        /// Current pointer position.
        pointer: PointerPosition,
        /// Viewport bounding the desktop area.
        viewport: Viewport,
    },
    /// Document-level pointer release; ends every active interaction.
    ReleasePointer,
    /// Select a desktop icon, or clear the selection.
    SelectIcon {
        /// Icon to select; `None` clears the selection.
        icon_id: Option<String>,
    },
    /// Icon double click: open the window it points to.
    ActivateIcon {
        /// Icon activated.
        icon_id: String,
        /// Viewport used to fit default geometry.
        viewport: Viewport,
    },
    /// Taskbar drop.
    ReorderTaskbar {
        /// Entry being dragged.
        dragged: WindowId,
        /// Entry dropped onto.
        target: WindowId,
        /// Side of the target the entry lands on.
        placement: DropPlacement,
    },
    /// Viewport size changed.
    ReflowViewport {
        /// New viewport.
        viewport: Viewport,
    },
    /// Start button: forget everything and return to the starter layout.
    ResetDesktop {
        /// Viewport used to fit default geometry.
        viewport: Viewport,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Write window positions, window states, z-order, and taskbar order in one pass.
    PersistLayout,
    /// Write the icon position map.
    PersistIconLayout,
    /// Delete every persisted slice.
    ClearPersistedState,
    /// Start the hold timer for an icon press.
    ScheduleIconHold {
        /// Icon being held.
        icon_id: String,
        /// Identifies the press so a timer from an earlier press is ignored.
        press_id: u64,
    },
    /// Deliver a lifecycle notification to observers.
    Notify(DesktopEvent),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that target nothing. The runtime treats them as no-ops.
pub enum ReducerError {
    /// The window id has no entry in the catalog.
    #[error("unknown window `{0}`")]
    UnknownWindow(WindowId),
    /// The window exists but is closed.
    #[error("window `{0}` is not open")]
    WindowNotOpen(WindowId),
    /// The icon id has no entry in the catalog.
    #[error("unknown desktop icon `{0}`")]
    UnknownIcon(String),
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// State is never modified when an error is returned.
///
/// # Errors
///
/// Returns a [`ReducerError`] when the action targets a window or icon that does not exist or a
/// window that is not open.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::HydrateSnapshot { snapshot, viewport } => {
            effects.extend(hydrate(state, interaction, snapshot, viewport));
        }
        DesktopAction::OpenWindow {
            window_id,
            viewport,
        } => {
            ensure_known(state, &window_id)?;
            open_window(state, &window_id, viewport, &mut effects);
        }
        DesktopAction::CloseWindow { window_id } => {
            ensure_open(state, &window_id)?;
            close_window(state, interaction, &window_id);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::CloseFrontmostWindow => {
            if let Some(window_id) = state.frontmost_visible().cloned() {
                close_window(state, interaction, &window_id);
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            let window = find_open_mut(state, &window_id)?;
            window.minimized = true;
            let record = window.state_record();
            state.window_states.insert(window_id, record);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::ToggleMaximize {
            window_id,
            viewport,
        } => {
            let window = find_open_mut(state, &window_id)?;
            if window.maximized {
                window.rect = window.restore_rect.take().unwrap_or(window.rect);
                window.maximized = false;
            } else {
                window.restore_rect = Some(window.rect);
                window.rect = maximized_rect(viewport);
                window.maximized = true;
            }
            let record = window.state_record();
            state.window_states.insert(window_id.clone(), record);
            if interaction
                .dragging
                .as_ref()
                .is_some_and(|session| session.window_id == window_id)
            {
                interaction.dragging = None;
            }
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::FocusWindow { window_id } => {
            ensure_open(state, &window_id)?;
            focus_window_internal(state, &window_id);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::ActivateTaskbarEntry { window_id } => {
            let window = find_open_mut(state, &window_id)?;
            if window.minimized {
                window.minimized = false;
                let record = window.state_record();
                state.window_states.insert(window_id.clone(), record);
                effects.push(RuntimeEffect::Notify(DesktopEvent::WindowShown(
                    window_id.clone(),
                )));
            }
            focus_window_internal(state, &window_id);
            effects.insert(0, RuntimeEffect::PersistLayout);
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let window = find_open(state, &window_id)?;
            if interaction.dragging.is_some() || window.minimized {
                return Ok(effects);
            }
            if window.maximized {
                // Maximized windows do not move, but the press still raises them.
                focus_window_internal(state, &window_id);
                effects.push(RuntimeEffect::PersistLayout);
                return Ok(effects);
            }
            let offset = PointerPosition::new(pointer.x - window.rect.x, pointer.y - window.rect.y);
            focus_window_internal(state, &window_id);
            interaction.dragging = Some(DragSession { window_id, offset });
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.as_ref() {
                match state.windows.get_mut(&session.window_id) {
                    Some(window) => window.rect = dragged_rect(window.rect, pointer, session.offset),
                    None => interaction.dragging = None,
                }
            }
        }
        DesktopAction::BeginResize { window_id, pointer } => {
            let window = find_open(state, &window_id)?;
            if interaction.resizing.is_some() || window.maximized || window.minimized {
                return Ok(effects);
            }
            let session = ResizeSession {
                window_id: window_id.clone(),
                pointer_start: pointer,
                width_start: window.rect.w,
                height_start: window.rect.h,
            };
            focus_window_internal(state, &window_id);
            interaction.resizing = Some(session);
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::UpdateResize { pointer, viewport } => {
            if let Some(session) = interaction.resizing.as_ref() {
                match state.windows.get_mut(&session.window_id) {
                    Some(window) => {
                        window.rect = resized_rect(window.rect, session, pointer, viewport)
                    }
                    None => interaction.resizing = None,
                }
            }
        }
        DesktopAction::PressIcon { icon_id, pointer } => {
            let position = desktop_icons::icon_position(state, &icon_id)
                .ok_or_else(|| ReducerError::UnknownIcon(icon_id.clone()))?;
            if interaction.icon_press.is_some() || interaction.icon_drag.is_some() {
                return Ok(effects);
            }
            state.selected_icon = Some(icon_id.clone());
            interaction.press_counter += 1;
            let press_id = interaction.press_counter;
            interaction.icon_press = Some(IconPress {
                icon_id: icon_id.clone(),
                press_id,
                offset: PointerPosition::new(pointer.x - position.x, pointer.y - position.y),
            });
            effects.push(RuntimeEffect::ScheduleIconHold { icon_id, press_id });
        }
        DesktopAction::IconHoldElapsed { icon_id, press_id } => {
            let pending = interaction
                .icon_press
                .as_ref()
                .is_some_and(|press| press.icon_id == icon_id && press.press_id == press_id);
            if pending {
                if let (Some(press), Some(position)) = (
                    interaction.icon_press.take(),
                    desktop_icons::icon_position(state, &icon_id),
                ) {
                    interaction.icon_drag = Some(IconDragSession {
                        icon_id: press.icon_id,
                        offset: press.offset,
                        position,
                    });
                }
            }
        }
        DesktopAction::UpdateIconDrag { pointer, viewport } => {
            if let Some(drag) = interaction.icon_drag.as_mut() {
                drag.position = desktop_icons::drag_position(pointer, drag.offset, viewport);
            }
        }
        DesktopAction::ReleasePointer => {
            effects.extend(release_pointer(state, interaction));
        }
        DesktopAction::SelectIcon { icon_id } => {
            if let Some(id) = icon_id.as_deref() {
                if state.catalog.icon(id).is_none() {
                    return Err(ReducerError::UnknownIcon(id.to_string()));
                }
            }
            state.selected_icon = icon_id;
        }
        DesktopAction::ActivateIcon { icon_id, viewport } => {
            let window_id = state
                .catalog
                .icon(&icon_id)
                .map(|icon| icon.opens.clone())
                .ok_or_else(|| ReducerError::UnknownIcon(icon_id.clone()))?;
            ensure_known(state, &window_id)?;
            state.selected_icon = Some(icon_id);
            open_window(state, &window_id, viewport, &mut effects);
        }
        DesktopAction::ReorderTaskbar {
            dragged,
            target,
            placement,
        } => {
            if taskbar_order::move_entry(&mut state.taskbar_order, &dragged, &target, placement) {
                effects.push(RuntimeEffect::PersistLayout);
                effects.push(RuntimeEffect::Notify(DesktopEvent::TaskbarReordered));
            }
        }
        DesktopAction::ReflowViewport { viewport } => {
            if reflow_windows(state, viewport) {
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::ResetDesktop { viewport } => {
            effects.push(RuntimeEffect::ClearPersistedState);
            effects.extend(hydrate(
                state,
                interaction,
                PersistedSnapshot::default(),
                viewport,
            ));
        }
    }

    normalize_active_window(state);
    Ok(effects)
}

fn ensure_known(state: &DesktopState, window_id: &WindowId) -> Result<(), ReducerError> {
    if state.catalog.contains(window_id) {
        Ok(())
    } else {
        Err(ReducerError::UnknownWindow(window_id.clone()))
    }
}

fn ensure_open(state: &DesktopState, window_id: &WindowId) -> Result<(), ReducerError> {
    find_open(state, window_id).map(|_| ())
}

fn find_open<'a>(
    state: &'a DesktopState,
    window_id: &WindowId,
) -> Result<&'a WindowRecord, ReducerError> {
    ensure_known(state, window_id)?;
    state
        .windows
        .get(window_id)
        .ok_or_else(|| ReducerError::WindowNotOpen(window_id.clone()))
}

fn find_open_mut<'a>(
    state: &'a mut DesktopState,
    window_id: &WindowId,
) -> Result<&'a mut WindowRecord, ReducerError> {
    ensure_known(state, window_id)?;
    state
        .windows
        .get_mut(window_id)
        .ok_or_else(|| ReducerError::WindowNotOpen(window_id.clone()))
}

fn open_window(
    state: &mut DesktopState,
    window_id: &WindowId,
    viewport: Viewport,
    effects: &mut Vec<RuntimeEffect>,
) {
    match state.windows.get(window_id).map(|w| w.minimized) {
        Some(false) => {
            focus_window_internal(state, window_id);
            effects.push(RuntimeEffect::PersistLayout);
            return;
        }
        Some(true) => {
            if let Some(window) = state.windows.get_mut(window_id) {
                window.minimized = false;
                let record = window.state_record();
                state.window_states.insert(window_id.clone(), record);
            }
        }
        None => {
            let rect = state.positions.get(window_id).copied().unwrap_or_else(|| {
                fit_default_rect(state.catalog.default_rect(window_id), viewport)
            });
            state.windows.insert(
                window_id.clone(),
                WindowRecord {
                    id: window_id.clone(),
                    title: state.catalog.title(window_id),
                    rect,
                    restore_rect: None,
                    z_index: 0,
                    minimized: false,
                    maximized: false,
                },
            );
            state.window_states.insert(
                window_id.clone(),
                WindowStateRecord {
                    open: true,
                    ..WindowStateRecord::default()
                },
            );
            taskbar_order::add_entry(&mut state.taskbar_order, window_id);
        }
    }
    focus_window_internal(state, window_id);
    effects.push(RuntimeEffect::PersistLayout);
    effects.push(RuntimeEffect::Notify(DesktopEvent::WindowShown(
        window_id.clone(),
    )));
}

fn close_window(state: &mut DesktopState, interaction: &mut InteractionState, window_id: &WindowId) {
    let Some(window) = state.windows.remove(window_id) else {
        return;
    };
    state
        .positions
        .insert(window_id.clone(), window.remembered_rect());
    state.z_order.retain(|id| id != window_id);
    taskbar_order::remove_entry(&mut state.taskbar_order, window_id);
    state
        .window_states
        .insert(window_id.clone(), WindowStateRecord::CLOSED);

    if interaction
        .dragging
        .as_ref()
        .is_some_and(|session| session.window_id == *window_id)
    {
        interaction.dragging = None;
    }
    if interaction
        .resizing
        .as_ref()
        .is_some_and(|session| session.window_id == *window_id)
    {
        interaction.resizing = None;
    }
}

fn release_pointer(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    let mut layout_committed = false;

    let finished = [
        interaction.dragging.take().map(|session| session.window_id),
        interaction.resizing.take().map(|session| session.window_id),
    ];
    for window_id in finished.into_iter().flatten() {
        if let Some(window) = state.windows.get(&window_id) {
            state.positions.insert(window_id, window.rect);
            layout_committed = true;
        }
    }
    if layout_committed {
        effects.push(RuntimeEffect::PersistLayout);
    }

    interaction.icon_press = None;
    if let Some(drag) = interaction.icon_drag.take() {
        state
            .icon_positions
            .insert(drag.icon_id, snap_to_grid(drag.position));
        effects.push(RuntimeEffect::PersistIconLayout);
    }

    effects
}

fn reflow_windows(state: &mut DesktopState, viewport: Viewport) -> bool {
    let mut changed = false;
    for (window_id, window) in state.windows.iter_mut() {
        if window.minimized {
            continue;
        }
        if window.maximized {
            let fitted = fit_default_rect(maximized_rect(viewport), viewport);
            if window.rect != fitted {
                window.rect = fitted;
                changed = true;
            }
            continue;
        }
        if let Some(next) = reflow_rect(window.rect, viewport) {
            window.rect = next;
            state.positions.insert(window_id.clone(), next);
            changed = true;
        }
    }
    changed
}

fn hydrate(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    snapshot: PersistedSnapshot,
    viewport: Viewport,
) -> Vec<RuntimeEffect> {
    let PersistedSnapshot {
        window_positions,
        window_states,
        z_order,
        taskbar_order: saved_taskbar_order,
        icon_positions,
    } = snapshot;

    let catalog = state.catalog.clone();
    *state = DesktopState::with_catalog(catalog);
    *interaction = InteractionState {
        press_counter: interaction.press_counter,
        ..InteractionState::default()
    };
    state.positions = window_positions;
    state.window_states = window_states;
    state.icon_positions = icon_positions
        .into_iter()
        .map(|(icon_id, position)| (icon_id, snap_to_grid(position)))
        .collect();

    let mut opened = Vec::new();
    for def in &state.catalog.windows {
        let flags = match state.window_states.get(&def.id) {
            Some(flags) => *flags,
            None if def.starter => WindowStateRecord {
                open: true,
                ..WindowStateRecord::default()
            },
            None => continue,
        };
        if !flags.open {
            continue;
        }

        let rect = state
            .positions
            .get(&def.id)
            .copied()
            .unwrap_or_else(|| fit_default_rect(def.default_rect, viewport));
        let (rect, restore_rect) = if flags.maximized {
            (maximized_rect(viewport), Some(rect))
        } else {
            (rect, None)
        };
        state.windows.insert(
            def.id.clone(),
            WindowRecord {
                id: def.id.clone(),
                title: def.title.clone(),
                rect,
                restore_rect,
                z_index: 0,
                minimized: flags.minimized,
                maximized: flags.maximized,
            },
        );
        opened.push((def.id.clone(), flags));
    }

    let open_ids: Vec<WindowId> = opened.iter().map(|(id, _)| id.clone()).collect();
    for (window_id, flags) in &opened {
        state.window_states.insert(window_id.clone(), *flags);
    }
    state.z_order = taskbar_order::merge_saved_order(&z_order, &open_ids);
    state.taskbar_order = taskbar_order::merge_saved_order(&saved_taskbar_order, &open_ids);
    restack_from_z_order(state);
    state.active_window = state.frontmost_visible().cloned();

    let mut effects = vec![RuntimeEffect::PersistLayout];
    effects.extend(
        opened
            .into_iter()
            .filter(|(_, flags)| !flags.minimized)
            .map(|(window_id, _)| RuntimeEffect::Notify(DesktopEvent::WindowShown(window_id))),
    );
    effects
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        catalog::{WindowCatalog, WindowDefinition},
        desktop_icons::{ICON_GRID_ORIGIN, ICON_GRID_SIZE},
        model::{IconPosition, WindowRect},
        window_manager::Z_INDEX_BASE,
    };

    const WIDE: Viewport = Viewport::new(1920, 1080, 40);

    fn id(raw: &str) -> WindowId {
        WindowId::from(raw)
    }

    fn ids(raw: &[&str]) -> Vec<WindowId> {
        raw.iter().copied().map(WindowId::from).collect()
    }

    fn test_catalog() -> WindowCatalog {
        WindowCatalog::new(vec![
            WindowDefinition::new("a", "Window A", WindowRect::new(10, 10, 400, 300)).starter(),
            WindowDefinition::new("b", "Window B", WindowRect::new(50, 60, 500, 350)),
            WindowDefinition::new("c", "Window C", WindowRect::new(90, 110, 2500, 1400)),
        ])
        .with_icons(&[("icon-a", "A", "a"), ("icon-b", "B", "b")])
    }

    fn fresh() -> (DesktopState, InteractionState) {
        (
            DesktopState::with_catalog(test_catalog()),
            InteractionState::default(),
        )
    }

    fn dispatch(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) -> Vec<RuntimeEffect> {
        reduce_desktop(state, interaction, action).expect("action should apply")
    }

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, raw: &str) {
        dispatch(
            state,
            interaction,
            DesktopAction::OpenWindow {
                window_id: id(raw),
                viewport: WIDE,
            },
        );
    }

    fn drag(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        raw: &str,
        from: (i32, i32),
        to: (i32, i32),
    ) -> Vec<RuntimeEffect> {
        dispatch(
            state,
            interaction,
            DesktopAction::BeginMove {
                window_id: id(raw),
                pointer: PointerPosition::new(from.0, from.1),
            },
        );
        dispatch(
            state,
            interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition::new(to.0, to.1),
            },
        );
        dispatch(state, interaction, DesktopAction::ReleasePointer)
    }

    fn rect_of(state: &DesktopState, raw: &str) -> WindowRect {
        state.window(&id(raw)).expect("window open").rect
    }

    #[test]
    fn opening_closed_window_registers_it_everywhere() {
        let (mut state, mut interaction) = fresh();

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow {
                window_id: id("b"),
                viewport: WIDE,
            },
        );

        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistLayout,
                RuntimeEffect::Notify(DesktopEvent::WindowShown(id("b"))),
            ]
        );
        assert_eq!(rect_of(&state, "b"), WindowRect::new(50, 60, 500, 350));
        assert_eq!(state.z_order, ids(&["b"]));
        assert_eq!(state.taskbar_order, ids(&["b"]));
        assert_eq!(state.active_window, Some(id("b")));
        assert_eq!(
            state.window_states.get(&id("b")),
            Some(&WindowStateRecord {
                open: true,
                minimized: false,
                maximized: false,
            })
        );
    }

    #[test]
    fn default_geometry_is_clamped_to_viewport() {
        let (mut state, mut interaction) = fresh();
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow {
                window_id: id("c"),
                viewport: Viewport::new(1024, 768, 40),
            },
        );
        assert_eq!(rect_of(&state, "c"), WindowRect::new(90, 110, 1004, 708));
    }

    #[test]
    fn close_then_open_restores_geometry_in_effect_at_close() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "b");
        drag(&mut state, &mut interaction, "b", (60, 70), (160, 270));
        let before_close = rect_of(&state, "b");
        assert_eq!(before_close, WindowRect::new(150, 260, 500, 350));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: id("b") },
        );
        assert!(!state.is_open(&id("b")));
        open(&mut state, &mut interaction, "b");

        assert_eq!(rect_of(&state, "b"), before_close);
    }

    #[test]
    fn closing_removes_from_orders_and_records_closed_state() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "a");
        open(&mut state, &mut interaction, "b");

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: id("b") },
        );

        assert_eq!(effects, vec![RuntimeEffect::PersistLayout]);
        assert_eq!(state.z_order, ids(&["a"]));
        assert_eq!(state.taskbar_order, ids(&["a"]));
        assert_eq!(
            state.window_states.get(&id("b")),
            Some(&WindowStateRecord::CLOSED)
        );
        assert_eq!(state.active_window, Some(id("a")));
    }

    #[test]
    fn closing_maximized_window_remembers_pre_maximize_geometry() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "b");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: id("b"),
                viewport: WIDE,
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow { window_id: id("b") },
        );

        assert_eq!(
            state.positions.get(&id("b")),
            Some(&WindowRect::new(50, 60, 500, 350))
        );
    }

    #[test]
    fn opening_visible_window_only_focuses_it() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "a");
        open(&mut state, &mut interaction, "b");
        let rect = rect_of(&state, "a");

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow {
                window_id: id("a"),
                viewport: Viewport::new(640, 480, 40),
            },
        );

        assert_eq!(effects, vec![RuntimeEffect::PersistLayout]);
        assert_eq!(rect_of(&state, "a"), rect);
        assert_eq!(state.z_order, ids(&["b", "a"]));
        assert_eq!(state.taskbar_order, ids(&["a", "b"]));
    }

    #[test]
    fn opening_minimized_window_shows_and_focuses_it() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "a");
        open(&mut state, &mut interaction, "b");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: id("a") },
        );

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow {
                window_id: id("a"),
                viewport: WIDE,
            },
        );

        assert!(effects.contains(&RuntimeEffect::Notify(DesktopEvent::WindowShown(id("a")))));
        let a = state.window(&id("a")).expect("a");
        assert!(!a.minimized);
        assert_eq!(state.active_window, Some(id("a")));
        assert_eq!(state.z_order.last(), Some(&id("a")));
    }

    #[test]
    fn minimize_keeps_window_in_z_order_and_taskbar() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "a");
        open(&mut state, &mut interaction, "b");

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: id("b") },
        );

        assert_eq!(state.z_order, ids(&["a", "b"]));
        assert_eq!(state.taskbar_order, ids(&["a", "b"]));
        assert_eq!(
            state.window_states.get(&id("b")),
            Some(&WindowStateRecord {
                open: true,
                minimized: true,
                maximized: false,
            })
        );
        assert_eq!(state.active_window, Some(id("a")));
        assert_eq!(state.frontmost_visible(), Some(&id("a")));
    }

    #[test]
    fn focus_sequence_keeps_unique_z_order_and_leaves_taskbar_alone() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "a");
        open(&mut state, &mut interaction, "b");
        let taskbar_before = state.taskbar_order.clone();

        for raw in ["a", "b", "a"] {
            dispatch(
                &mut state,
                &mut interaction,
                DesktopAction::FocusWindow { window_id: id(raw) },
            );
            assert_eq!(state.z_order.last(), Some(&id(raw)));
        }

        assert_eq!(state.z_order, ids(&["b", "a"]));
        assert_eq!(state.taskbar_order, taskbar_before);
        assert_eq!(state.active_window, Some(id("a")));
        assert_eq!(rect_of(&state, "a"), WindowRect::new(10, 10, 400, 300));
        let a = state.window(&id("a")).expect("a").z_index;
        let b = state.window(&id("b")).expect("b").z_index;
        assert!(a > b);
    }

    #[test]
    fn maximize_twice_restores_exact_geometry() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "b");
        let original = rect_of(&state, "b");
        let toggle = DesktopAction::ToggleMaximize {
            window_id: id("b"),
            viewport: WIDE,
        };

        dispatch(&mut state, &mut interaction, toggle.clone());
        let maximized = state.window(&id("b")).expect("b").clone();
        assert!(maximized.maximized);
        assert_eq!(maximized.rect, WindowRect::new(0, 0, 1920, 1040));
        assert_eq!(maximized.restore_rect, Some(original));
        assert!(state.window_states.get(&id("b")).expect("state").maximized);

        dispatch(&mut state, &mut interaction, toggle);
        let restored = state.window(&id("b")).expect("b");
        assert!(!restored.maximized);
        assert_eq!(restored.rect, original);
        assert_eq!(restored.restore_rect, None);
        assert!(!state.window_states.get(&id("b")).expect("state").maximized);
    }

    #[test]
    fn maximized_window_can_also_be_minimized() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "b");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: id("b"),
                viewport: WIDE,
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: id("b") },
        );

        assert_eq!(
            state.window_states.get(&id("b")),
            Some(&WindowStateRecord {
                open: true,
                minimized: true,
                maximized: true,
            })
        );
    }

    #[test]
    fn commands_on_missing_windows_leave_state_untouched() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "a");
        let before = state.clone();

        let unknown = [
            DesktopAction::OpenWindow {
                window_id: id("ghost"),
                viewport: WIDE,
            },
            DesktopAction::CloseWindow {
                window_id: id("ghost"),
            },
            DesktopAction::FocusWindow {
                window_id: id("ghost"),
            },
        ];
        for action in unknown {
            assert!(matches!(
                reduce_desktop(&mut state, &mut interaction, action),
                Err(ReducerError::UnknownWindow(_))
            ));
        }

        let closed = [
            DesktopAction::MinimizeWindow { window_id: id("b") },
            DesktopAction::ToggleMaximize {
                window_id: id("b"),
                viewport: WIDE,
            },
            DesktopAction::ActivateTaskbarEntry { window_id: id("b") },
            DesktopAction::CloseWindow { window_id: id("b") },
        ];
        for action in closed {
            assert_eq!(
                reduce_desktop(&mut state, &mut interaction, action),
                Err(ReducerError::WindowNotOpen(id("b")))
            );
        }

        assert_eq!(
            reduce_desktop(
                &mut state,
                &mut interaction,
                DesktopAction::PressIcon {
                    icon_id: "nope".to_string(),
                    pointer: PointerPosition::default(),
                },
            ),
            Err(ReducerError::UnknownIcon("nope".to_string()))
        );
        assert_eq!(state, before);
        assert!(interaction.is_idle());
    }

    #[test]
    fn dragging_moves_window_and_commits_on_release() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "a");
        open(&mut state, &mut interaction, "b");

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("a"),
                pointer: PointerPosition::new(20, 15),
            },
        );
        assert_eq!(state.z_order.last(), Some(&id("a")));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition::new(-40, -100),
            },
        );
        assert_eq!(rect_of(&state, "a"), WindowRect::new(-50, 0, 400, 300));
        assert_eq!(
            state.positions.get(&id("a")),
            None,
            "geometry commits on release only"
        );

        let effects = dispatch(&mut state, &mut interaction, DesktopAction::ReleasePointer);
        assert_eq!(effects, vec![RuntimeEffect::PersistLayout]);
        assert_eq!(
            state.positions.get(&id("a")),
            Some(&WindowRect::new(-50, 0, 400, 300))
        );
        assert!(interaction.is_idle());
    }

    #[test]
    fn second_press_during_drag_is_ignored() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "a");
        open(&mut state, &mut interaction, "b");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("a"),
                pointer: PointerPosition::new(20, 15),
            },
        );
        let z_before = state.z_order.clone();

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("b"),
                pointer: PointerPosition::new(70, 70),
            },
        );

        assert_eq!(effects, Vec::new());
        assert_eq!(state.z_order, z_before);
        assert_eq!(
            interaction.dragging.as_ref().map(|s| s.window_id.clone()),
            Some(id("a"))
        );
    }

    #[test]
    fn maximized_window_press_focuses_without_dragging() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "b");
        open(&mut state, &mut interaction, "c");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: id("b"),
                viewport: WIDE,
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::FocusWindow { window_id: id("c") },
        );
        let maximized = rect_of(&state, "b");

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id("b"),
                pointer: PointerPosition::new(5, 5),
            },
        );

        assert_eq!(effects, vec![RuntimeEffect::PersistLayout]);
        assert!(interaction.dragging.is_none());
        assert_eq!(state.active_window, Some(id("b")));
        assert_eq!(state.z_order, ids(&["c", "b"]));
        assert_eq!(rect_of(&state, "b"), maximized);
    }

    #[test]
    fn resize_is_clamped_while_moving_and_committed_on_release() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "b");
        let small = Viewport::new(800, 600, 40);

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: id("b"),
                pointer: PointerPosition::new(550, 410),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition::new(2000, 2000),
                viewport: small,
            },
        );
        assert_eq!(rect_of(&state, "b"), WindowRect::new(50, 60, 780, 540));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition::new(0, 0),
                viewport: small,
            },
        );
        assert_eq!(rect_of(&state, "b"), WindowRect::new(50, 60, 200, 100));

        let effects = dispatch(&mut state, &mut interaction, DesktopAction::ReleasePointer);
        assert_eq!(effects, vec![RuntimeEffect::PersistLayout]);
        assert_eq!(
            state.positions.get(&id("b")),
            Some(&WindowRect::new(50, 60, 200, 100))
        );
    }

    #[test]
    fn release_without_interaction_is_quiet() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "a");
        let effects = dispatch(&mut state, &mut interaction, DesktopAction::ReleasePointer);
        assert_eq!(effects, Vec::new());
        assert!(interaction.is_idle());
    }

    #[test]
    fn short_icon_press_selects_without_dragging() {
        let (mut state, mut interaction) = fresh();

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::PressIcon {
                icon_id: "icon-b".to_string(),
                pointer: PointerPosition::new(30, 130),
            },
        );
        assert_eq!(
            effects,
            vec![RuntimeEffect::ScheduleIconHold {
                icon_id: "icon-b".to_string(),
                press_id: 1,
            }]
        );
        assert_eq!(state.selected_icon.as_deref(), Some("icon-b"));

        dispatch(&mut state, &mut interaction, DesktopAction::ReleasePointer);
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::IconHoldElapsed {
                icon_id: "icon-b".to_string(),
                press_id: 1,
            },
        );

        assert!(interaction.is_idle());
        assert_eq!(state.icon_positions, BTreeMap::new());
    }

    #[test]
    fn hold_timer_from_earlier_press_does_not_start_drag() {
        let (mut state, mut interaction) = fresh();
        let press = |state: &mut DesktopState, interaction: &mut InteractionState| {
            dispatch(
                state,
                interaction,
                DesktopAction::PressIcon {
                    icon_id: "icon-a".to_string(),
                    pointer: PointerPosition::new(30, 30),
                },
            )
        };
        press(&mut state, &mut interaction);
        dispatch(&mut state, &mut interaction, DesktopAction::ReleasePointer);
        let second = press(&mut state, &mut interaction);
        assert_eq!(
            second,
            vec![RuntimeEffect::ScheduleIconHold {
                icon_id: "icon-a".to_string(),
                press_id: 2,
            }]
        );

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::IconHoldElapsed {
                icon_id: "icon-a".to_string(),
                press_id: 1,
            },
        );
        assert!(interaction.icon_drag.is_none());
        assert!(interaction.icon_press.is_some());

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::IconHoldElapsed {
                icon_id: "icon-a".to_string(),
                press_id: 2,
            },
        );
        assert_eq!(
            interaction.icon_drag.as_ref().map(|drag| drag.icon_id.as_str()),
            Some("icon-a")
        );
    }

    #[test]
    fn held_icon_drag_snaps_to_grid_on_release() {
        let (mut state, mut interaction) = fresh();
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::PressIcon {
                icon_id: "icon-a".to_string(),
                pointer: PointerPosition::new(30, 30),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::IconHoldElapsed {
                icon_id: "icon-a".to_string(),
                press_id: 1,
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateIconDrag {
                pointer: PointerPosition::new(287, 163),
                viewport: WIDE,
            },
        );
        assert_eq!(
            interaction.icon_drag.as_ref().map(|drag| drag.position),
            Some(IconPosition { x: 277, y: 153 })
        );

        let effects = dispatch(&mut state, &mut interaction, DesktopAction::ReleasePointer);

        assert_eq!(effects, vec![RuntimeEffect::PersistIconLayout]);
        let placed = state.icon_positions.get("icon-a").copied().expect("placed");
        assert_eq!(placed, IconPosition { x: 320, y: 120 });
        assert_eq!((placed.x - ICON_GRID_ORIGIN.x) % ICON_GRID_SIZE, 0);
        assert_eq!((placed.y - ICON_GRID_ORIGIN.y) % ICON_GRID_SIZE, 0);
        assert!(interaction.is_idle());
    }

    #[test]
    fn activating_icon_opens_its_window() {
        let (mut state, mut interaction) = fresh();
        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ActivateIcon {
                icon_id: "icon-b".to_string(),
                viewport: WIDE,
            },
        );
        assert!(state.is_open(&id("b")));
        assert_eq!(state.selected_icon.as_deref(), Some("icon-b"));
        assert!(effects.contains(&RuntimeEffect::Notify(DesktopEvent::WindowShown(id("b")))));
    }

    #[test]
    fn taskbar_click_restores_minimized_window_then_focuses() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "a");
        open(&mut state, &mut interaction, "b");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: id("a") },
        );

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ActivateTaskbarEntry { window_id: id("a") },
        );

        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistLayout,
                RuntimeEffect::Notify(DesktopEvent::WindowShown(id("a"))),
            ]
        );
        assert!(!state.window(&id("a")).expect("a").minimized);
        assert_eq!(state.active_window, Some(id("a")));
        assert_eq!(state.taskbar_order, ids(&["a", "b"]));
    }

    #[test]
    fn taskbar_drop_reorders_and_persists_immediately() {
        let (mut state, mut interaction) = fresh();
        for raw in ["a", "b", "c"] {
            open(&mut state, &mut interaction, raw);
        }
        let z_before = state.z_order.clone();

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ReorderTaskbar {
                dragged: id("c"),
                target: id("a"),
                placement: DropPlacement::Before,
            },
        );

        assert_eq!(state.taskbar_order, ids(&["c", "a", "b"]));
        assert_eq!(state.z_order, z_before);
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistLayout,
                RuntimeEffect::Notify(DesktopEvent::TaskbarReordered),
            ]
        );

        let self_drop = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ReorderTaskbar {
                dragged: id("a"),
                target: id("a"),
                placement: DropPlacement::After,
            },
        );
        assert_eq!(self_drop, Vec::new());
    }

    #[test]
    fn reflow_fits_about_window_into_smaller_viewport() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::OpenWindow {
                window_id: id("about"),
                viewport: WIDE,
            },
        );
        assert_eq!(rect_of(&state, "about"), WindowRect::new(300, 20, 780, 800));

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ReflowViewport {
                viewport: Viewport::new(1024, 768, 40),
            },
        );

        let rect = rect_of(&state, "about");
        assert!(rect.w <= 1004 && rect.h <= 708);
        assert!(rect.x >= 0 && rect.y >= 0);
        assert!(rect.right() <= 1004 && rect.bottom() <= 708);
        assert_eq!(state.positions.get(&id("about")), Some(&rect));
        assert_eq!(effects, vec![RuntimeEffect::PersistLayout]);
    }

    #[test]
    fn reflow_skips_minimized_windows_and_refits_maximized_ones() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "b");
        open(&mut state, &mut interaction, "c");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: id("c") },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: id("b"),
                viewport: WIDE,
            },
        );
        let minimized_rect = rect_of(&state, "c");

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ReflowViewport {
                viewport: Viewport::new(640, 480, 40),
            },
        );

        assert_eq!(rect_of(&state, "c"), minimized_rect);
        let viewport = Viewport::new(640, 480, 40);
        let maximized = rect_of(&state, "b");
        assert_eq!(maximized, WindowRect::new(0, 0, 620, 420));
        assert!(maximized.right() <= viewport.max_right());
        assert!(maximized.bottom() <= viewport.max_bottom());
        assert_eq!(
            state.window(&id("b")).expect("b").restore_rect,
            Some(WindowRect::new(50, 60, 500, 350))
        );
    }

    #[test]
    fn escape_closes_frontmost_visible_window() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "a");
        open(&mut state, &mut interaction, "b");
        open(&mut state, &mut interaction, "c");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: id("c") },
        );

        dispatch(&mut state, &mut interaction, DesktopAction::CloseFrontmostWindow);

        assert!(!state.is_open(&id("b")));
        assert!(state.is_open(&id("c")));
        assert_eq!(state.active_window, Some(id("a")));
    }

    #[test]
    fn hydrate_without_saved_state_opens_only_starters() {
        let (mut state, mut interaction) = fresh();

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateSnapshot {
                snapshot: PersistedSnapshot::default(),
                viewport: WIDE,
            },
        );

        assert_eq!(state.windows.keys().cloned().collect::<Vec<_>>(), ids(&["a"]));
        assert_eq!(state.z_order, ids(&["a"]));
        assert_eq!(state.taskbar_order, ids(&["a"]));
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistLayout,
                RuntimeEffect::Notify(DesktopEvent::WindowShown(id("a"))),
            ]
        );
    }

    #[test]
    fn hydrate_replays_flags_and_both_orders() {
        let (mut state, mut interaction) = fresh();
        let flags = |open, minimized, maximized| WindowStateRecord {
            open,
            minimized,
            maximized,
        };
        let snapshot = PersistedSnapshot {
            window_positions: BTreeMap::from([
                (id("a"), WindowRect::new(1, 2, 300, 200)),
                (id("b"), WindowRect::new(5, 6, 310, 210)),
            ]),
            window_states: BTreeMap::from([
                (id("a"), flags(false, false, false)),
                (id("b"), flags(true, true, false)),
                (id("c"), flags(true, false, true)),
                (id("retired"), flags(true, false, false)),
            ]),
            z_order: ids(&["c", "ghost", "b"]),
            taskbar_order: ids(&["b", "c"]),
            icon_positions: BTreeMap::from([("icon-a".to_string(), IconPosition { x: 120, y: 20 })]),
        };

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateSnapshot {
                snapshot,
                viewport: WIDE,
            },
        );

        assert!(!state.is_open(&id("a")));
        assert_eq!(state.z_order, ids(&["c", "b"]));
        assert_eq!(state.taskbar_order, ids(&["b", "c"]));
        let b = state.window(&id("b")).expect("b");
        assert!(b.minimized);
        assert_eq!(b.rect, WindowRect::new(5, 6, 310, 210));
        assert_eq!(b.z_index, Z_INDEX_BASE + 2);
        let c = state.window(&id("c")).expect("c");
        assert!(c.maximized);
        assert_eq!(c.rect, WindowRect::new(0, 0, 1920, 1040));
        assert_eq!(c.restore_rect, Some(WindowRect::new(90, 110, 1900, 1020)));
        assert_eq!(c.z_index, Z_INDEX_BASE + 1);
        assert_eq!(state.z_counter, Z_INDEX_BASE + 2);
        assert_eq!(state.active_window, Some(id("c")));
        assert_eq!(
            state.icon_positions.get("icon-a"),
            Some(&IconPosition { x: 120, y: 20 })
        );
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::PersistLayout,
                RuntimeEffect::Notify(DesktopEvent::WindowShown(id("c"))),
            ]
        );
    }

    #[test]
    fn hydrate_snaps_stored_icon_positions_onto_the_grid() {
        let (mut state, mut interaction) = fresh();
        let snapshot = PersistedSnapshot {
            icon_positions: BTreeMap::from([
                ("icon-a".to_string(), IconPosition { x: 171, y: 69 }),
                ("icon-b".to_string(), IconPosition { x: 220, y: 120 }),
            ]),
            ..PersistedSnapshot::default()
        };

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateSnapshot {
                snapshot,
                viewport: WIDE,
            },
        );

        assert_eq!(
            state.icon_positions,
            BTreeMap::from([
                ("icon-a".to_string(), IconPosition { x: 220, y: 20 }),
                ("icon-b".to_string(), IconPosition { x: 220, y: 120 }),
            ])
        );
    }

    #[test]
    fn hydrate_appends_open_windows_missing_from_saved_orders() {
        let (mut state, mut interaction) = fresh();
        let snapshot = PersistedSnapshot {
            window_states: BTreeMap::from([(
                id("b"),
                WindowStateRecord {
                    open: true,
                    ..WindowStateRecord::default()
                },
            )]),
            z_order: ids(&["b"]),
            ..PersistedSnapshot::default()
        };

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateSnapshot {
                snapshot,
                viewport: WIDE,
            },
        );

        assert_eq!(state.z_order, ids(&["b", "a"]));
        assert_eq!(state.taskbar_order, ids(&["a", "b"]));
        assert_eq!(state.active_window, Some(id("a")));
    }

    #[test]
    fn reset_clears_storage_and_returns_to_starter_layout() {
        let (mut state, mut interaction) = fresh();
        open(&mut state, &mut interaction, "b");
        drag(&mut state, &mut interaction, "b", (60, 70), (260, 270));
        state
            .icon_positions
            .insert("icon-a".to_string(), IconPosition { x: 520, y: 20 });

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ResetDesktop { viewport: WIDE },
        );

        assert_eq!(effects.first(), Some(&RuntimeEffect::ClearPersistedState));
        assert_eq!(state.windows.keys().cloned().collect::<Vec<_>>(), ids(&["a"]));
        assert!(state.positions.is_empty());
        assert!(state.icon_positions.is_empty());
    }
}
