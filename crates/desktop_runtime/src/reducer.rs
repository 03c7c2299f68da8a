//! Reducer actions, side-effect intents, and transition logic for the window manager.

use platform_host::next_monotonic_timestamp_ms;

use crate::model::{
    Viewport, WindowId, WindowPosition, WindowRecord, WindowSize, WindowState,
    DEFAULT_WINDOW_ICON, DEFAULT_WINDOW_POSITION, DEFAULT_WINDOW_SIZE, DEFAULT_WINDOW_TITLE,
};
use crate::window_manager::{
    clamp_position, clamp_size, focus_window_internal, issue_z_index, normalize_focus,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_windows`] to mutate [`WindowState`].
pub enum WindowAction {
    /// Open a new focused window with default geometry.
    Open {
        /// Title bar text; empty means [`DEFAULT_WINDOW_TITLE`].
        title: String,
        /// Display glyph; empty means [`DEFAULT_WINDOW_ICON`].
        icon: String,
    },
    /// Remove a window.
    Close {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window.
    Focus {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Hide a window in the taskbar.
    Minimize {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Un-minimize and focus a window.
    Restore {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Flip the maximized flag and focus the window.
    ToggleMaximize {
        /// Window to maximize or un-maximize.
        window_id: WindowId,
    },
    /// Move a window's top-left corner (clamped to the viewport).
    Move {
        /// Window to move.
        window_id: WindowId,
        /// Requested top-left corner.
        position: WindowPosition,
    },
    /// Resize a window (clamped to the viewport and minimum size).
    Resize {
        /// Window to resize.
        window_id: WindowId,
        /// Requested size.
        size: WindowSize,
    },
    /// Replace a window's title.
    SetTitle {
        /// Window to retitle.
        window_id: WindowId,
        /// New title.
        title: String,
    },
    /// Replace a window's icon.
    SetIcon {
        /// Window to update.
        window_id: WindowId,
        /// New display glyph.
        icon: String,
    },
    /// Replace the whole collection with a persisted layout.
    Hydrate {
        /// Records loaded from durable storage.
        windows: Vec<WindowRecord>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_windows`] for the store to execute.
pub enum RuntimeEffect {
    /// Persist the current window collection.
    PersistLayout,
    /// A window was created with this id.
    WindowOpened(WindowId),
}

/// Applies a [`WindowAction`] to the window state and collects resulting side effects.
///
/// This is the only place window records are mutated. Every action is total: one that names a
/// window not in the collection changes nothing and emits no effects, so a handler left over
/// from a closed window can never fail. `viewport` is the surface size at dispatch time and is
/// only consulted by move and resize.
pub fn reduce_windows(
    state: &mut WindowState,
    action: WindowAction,
    viewport: Viewport,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    let changed = match action {
        WindowAction::Open { title, icon } => {
            let window_id = next_window_id(state);
            let z_index = issue_z_index(state);
            for window in &mut state.windows {
                window.is_focused = false;
            }
            state.windows.push(WindowRecord {
                id: window_id,
                title: or_default(title, DEFAULT_WINDOW_TITLE),
                icon: or_default(icon, DEFAULT_WINDOW_ICON),
                position: DEFAULT_WINDOW_POSITION,
                size: DEFAULT_WINDOW_SIZE,
                is_minimized: false,
                is_maximized: false,
                z_index,
                is_focused: true,
                created_at: next_monotonic_timestamp_ms(),
            });
            state.focused = Some(window_id);
            effects.push(RuntimeEffect::WindowOpened(window_id));
            true
        }
        WindowAction::Close { window_id } => {
            let before_len = state.windows.len();
            state.windows.retain(|w| w.id != window_id);
            if state.focused == Some(window_id) {
                state.focused = None;
            }
            state.windows.len() != before_len
        }
        WindowAction::Focus { window_id } => focus_window_internal(state, window_id),
        WindowAction::Minimize { window_id } => match find_window_mut(state, window_id) {
            Some(window) if !window.is_minimized => {
                window.is_minimized = true;
                window.is_focused = false;
                if state.focused == Some(window_id) {
                    state.focused = None;
                }
                true
            }
            _ => false,
        },
        WindowAction::Restore { window_id } => {
            let unminimized = match find_window_mut(state, window_id) {
                Some(window) if window.is_minimized => {
                    window.is_minimized = false;
                    true
                }
                _ => false,
            };
            focus_window_internal(state, window_id) || unminimized
        }
        WindowAction::ToggleMaximize { window_id } => match find_window_mut(state, window_id) {
            Some(window) => {
                window.is_maximized = !window.is_maximized;
                focus_window_internal(state, window_id);
                true
            }
            None => false,
        },
        WindowAction::Move {
            window_id,
            position,
        } => match find_window_mut(state, window_id) {
            Some(window) if !window.is_maximized => {
                let clamped = clamp_position(position, window.size, viewport);
                let moved = clamped != window.position;
                window.position = clamped;
                moved
            }
            _ => false,
        },
        WindowAction::Resize { window_id, size } => match find_window_mut(state, window_id) {
            Some(window) if !window.is_maximized => {
                let clamped = clamp_size(size, viewport);
                let resized = clamped != window.size;
                window.size = clamped;
                resized
            }
            _ => false,
        },
        WindowAction::SetTitle { window_id, title } => match find_window_mut(state, window_id) {
            Some(window) if window.title != title => {
                window.title = title;
                true
            }
            _ => false,
        },
        WindowAction::SetIcon { window_id, icon } => match find_window_mut(state, window_id) {
            Some(window) if window.icon != icon => {
                window.icon = icon;
                true
            }
            _ => false,
        },
        WindowAction::Hydrate { windows } => {
            *state = WindowState::from_windows(windows);
            false
        }
    };

    normalize_focus(state);
    if changed {
        effects.insert(0, RuntimeEffect::PersistLayout);
    }
    effects
}

fn or_default(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn next_window_id(state: &mut WindowState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

fn find_window_mut(state: &mut WindowState, window_id: WindowId) -> Option<&mut WindowRecord> {
    state.windows.iter_mut().find(|w| w.id == window_id)
}
