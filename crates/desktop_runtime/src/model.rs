use std::fmt;

use serde::{Deserialize, Serialize};

pub use platform_host::Viewport;

use crate::window_manager::{normalize_focus, normalize_loaded_stack, restore_focus_target};

pub const DEFAULT_WINDOW_TITLE: &str = "New Window";
pub const DEFAULT_WINDOW_ICON: &str = "📄";
pub const DEFAULT_WINDOW_POSITION: WindowPosition = WindowPosition { x: 100, y: 100 };
pub const DEFAULT_WINDOW_SIZE: WindowSize = WindowSize {
    width: 600,
    height: 400,
};
/// z-index given to the first window opened on an empty desktop.
pub const BASE_Z_INDEX: u32 = 1000;
pub const DEFAULT_STORAGE_KEY: &str = "webdesk.windows.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn from_parts(position: WindowPosition, size: WindowSize) -> Self {
        Self {
            x: position.x,
            y: position.y,
            w: size.width,
            h: size.height,
        }
    }

    pub fn position(self) -> WindowPosition {
        WindowPosition {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(self) -> WindowSize {
        WindowSize {
            width: self.w,
            height: self.h,
        }
    }
}

/// One simulated application window.
///
/// Field names are the persisted wire format; renaming one breaks layouts saved by earlier
/// sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    /// Top-left corner. While maximized this is the geometry restored on un-maximize.
    pub position: WindowPosition,
    pub size: WindowSize,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub z_index: u32,
    pub is_focused: bool,
    /// Unix milliseconds.
    pub created_at: u64,
}

impl WindowRecord {
    pub fn rect(&self) -> WindowRect {
        WindowRect::from_parts(self.position, self.size)
    }
}

/// Immutable view of the collection handed to subscribers after each change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub windows: Vec<WindowRecord>,
    pub focused: Option<WindowId>,
}

impl WindowSnapshot {
    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    /// Non-minimized windows in paint order (ascending z-index, topmost last).
    pub fn visible_windows(&self) -> Vec<WindowRecord> {
        let mut visible: Vec<WindowRecord> = self
            .windows
            .iter()
            .filter(|w| !w.is_minimized)
            .cloned()
            .collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    /// Minimized windows in insertion order.
    pub fn minimized_windows(&self) -> Vec<WindowRecord> {
        self.windows
            .iter()
            .filter(|w| w.is_minimized)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    pub next_window_id: u64,
    /// High-water mark for issued z-indices; never handed out twice.
    pub next_z_index: u32,
    pub windows: Vec<WindowRecord>,
    pub focused: Option<WindowId>,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            next_window_id: 1,
            next_z_index: BASE_Z_INDEX,
            windows: Vec::new(),
            focused: None,
        }
    }
}

impl WindowState {
    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            windows: self.windows.clone(),
            focused: self.focused,
        }
    }

    /// Rebuilds state from a persisted window list.
    ///
    /// The stack is renumbered from [`BASE_Z_INDEX`] and undersized records are raised to the
    /// minimum size. Id and z-index counters resume above the loaded maxima, and focus goes to
    /// the most recently created window that is not minimized.
    pub fn from_windows(mut windows: Vec<WindowRecord>) -> Self {
        normalize_loaded_stack(&mut windows);
        let mut state = Self::default();
        state.next_window_id = windows
            .iter()
            .map(|w| w.id.0)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        state.next_z_index = windows
            .iter()
            .map(|w| w.z_index)
            .max()
            .map_or(BASE_Z_INDEX, |z| z.saturating_add(1));
        state.focused = restore_focus_target(&windows);
        state.windows = windows;
        normalize_focus(&mut state);
        state
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopPreferences {
    pub restore_on_boot: bool,
    pub storage_key: String,
}

impl Default for DesktopPreferences {
    fn default() -> Self {
        Self {
            restore_on_boot: true,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    /// Whether dragging this edge moves the window's left side.
    pub fn moves_left(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    /// Whether dragging this edge moves the window's top side.
    pub fn moves_top(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    /// Pointer location relative to the window's top-left at drag start.
    pub pointer_offset: PointerPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

/// Transient pointer gesture; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

impl GestureState {
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session.window_id),
            Self::Resizing(session) => Some(session.window_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn record(id: u64, created_at: u64, minimized: bool) -> WindowRecord {
        WindowRecord {
            id: WindowId(id),
            title: format!("Window {id}"),
            icon: DEFAULT_WINDOW_ICON.to_string(),
            position: DEFAULT_WINDOW_POSITION,
            size: DEFAULT_WINDOW_SIZE,
            is_minimized: minimized,
            is_maximized: false,
            z_index: BASE_Z_INDEX + id as u32,
            is_focused: false,
            created_at,
        }
    }

    #[test]
    fn record_serializes_with_camel_case_field_names() {
        let value = serde_json::to_value(record(7, 42, false)).expect("serialize");
        assert_eq!(
            value,
            json!({
                "id": 7,
                "title": "Window 7",
                "icon": "📄",
                "position": { "x": 100, "y": 100 },
                "size": { "width": 600, "height": 400 },
                "isMinimized": false,
                "isMaximized": false,
                "zIndex": 1007,
                "isFocused": false,
                "createdAt": 42
            })
        );
    }

    #[test]
    fn from_windows_resumes_counters_above_loaded_maxima() {
        let state = WindowState::from_windows(vec![record(3, 10, false), record(9, 5, false)]);
        assert_eq!(state.next_window_id, 10);
        assert_eq!(state.next_z_index, BASE_Z_INDEX + 2);
        let z: Vec<u32> = state.windows.iter().map(|w| w.z_index).collect();
        assert_eq!(z, vec![BASE_Z_INDEX, BASE_Z_INDEX + 1]);
    }

    #[test]
    fn from_windows_focuses_most_recent_non_minimized_window() {
        let state = WindowState::from_windows(vec![
            record(1, 10, false),
            record(2, 30, true),
            record(3, 20, false),
        ]);
        assert_eq!(state.focused_window_id(), Some(WindowId(3)));
        let focused: Vec<WindowId> = state
            .windows
            .iter()
            .filter(|w| w.is_focused)
            .map(|w| w.id)
            .collect();
        assert_eq!(focused, vec![WindowId(3)]);
    }

    #[test]
    fn from_empty_windows_matches_default_state() {
        assert_eq!(WindowState::from_windows(Vec::new()), WindowState::default());
    }

    #[test]
    fn snapshot_queries_split_visible_and_minimized() {
        let mut low = record(1, 1, false);
        low.z_index = 1050;
        let high = record(2, 2, false);
        let hidden = record(3, 3, true);
        let snapshot = WindowSnapshot {
            windows: vec![low, high, hidden],
            focused: None,
        };

        let visible: Vec<WindowId> = snapshot.visible_windows().iter().map(|w| w.id).collect();
        assert_eq!(visible, vec![WindowId(2), WindowId(1)]);
        let minimized: Vec<WindowId> = snapshot.minimized_windows().iter().map(|w| w.id).collect();
        assert_eq!(minimized, vec![WindowId(3)]);
    }

    #[test]
    fn preferences_fill_missing_fields_with_defaults() {
        let prefs: DesktopPreferences =
            serde_json::from_str(r#"{"restore_on_boot":false}"#).expect("parse");
        assert!(!prefs.restore_on_boot);
        assert_eq!(prefs.storage_key, DEFAULT_STORAGE_KEY);
    }
}
