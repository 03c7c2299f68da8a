//! Bounds policy and stacking helpers shared by the window reducer.
//!
//! Geometry functions are pure: they take the viewport as an argument and never reject a value,
//! only clamp it into the legal range.

use crate::model::{
    ResizeEdge, Viewport, WindowId, WindowPosition, WindowRecord, WindowRect, WindowSize,
    WindowState,
};

/// Height of the taskbar strip along the bottom of the viewport.
pub const TASKBAR_HEIGHT: i32 = 60;
/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 200;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 150;

fn usable_height(viewport: Viewport) -> i32 {
    viewport.height - TASKBAR_HEIGHT
}

/// Clamps a top-left corner so a window of `size` stays inside the area above the taskbar.
///
/// When the window is larger than the viewport the range is inverted and the corner is pinned
/// to 0.
pub fn clamp_position(
    position: WindowPosition,
    size: WindowSize,
    viewport: Viewport,
) -> WindowPosition {
    WindowPosition {
        x: position.x.min(viewport.width - size.width).max(0),
        y: position.y.min(usable_height(viewport) - size.height).max(0),
    }
}

/// Clamps a size between the minimum window size and the area above the taskbar.
///
/// The minimum wins when the viewport is smaller than the minimum.
pub fn clamp_size(size: WindowSize, viewport: Viewport) -> WindowSize {
    WindowSize {
        width: size.width.min(viewport.width).max(MIN_WINDOW_WIDTH),
        height: size.height.min(usable_height(viewport)).max(MIN_WINDOW_HEIGHT),
    }
}

/// Geometry of a maximized window: the whole viewport except the taskbar.
pub fn maximized_geometry(viewport: Viewport) -> WindowRect {
    WindowRect {
        x: 0,
        y: 0,
        w: viewport.width,
        h: usable_height(viewport),
    }
}

/// Rectangle a renderer should paint for `record` under the current viewport.
pub fn effective_rect(record: &WindowRecord, viewport: Viewport) -> WindowRect {
    if record.is_maximized {
        maximized_geometry(viewport)
    } else {
        record.rect()
    }
}

/// Applies resize deltas for a given edge/corner drag.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    match edge {
        ResizeEdge::East => WindowRect {
            w: start.w + dx,
            ..start
        },
        ResizeEdge::West => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            ..start
        },
        ResizeEdge::South => WindowRect {
            h: start.h + dy,
            ..start
        },
        ResizeEdge::North => WindowRect {
            y: start.y + dy,
            h: start.h - dy,
            ..start
        },
        ResizeEdge::NorthEast => WindowRect {
            y: start.y + dy,
            h: start.h - dy,
            w: start.w + dx,
            ..start
        },
        ResizeEdge::NorthWest => WindowRect {
            x: start.x + dx,
            y: start.y + dy,
            w: start.w - dx,
            h: start.h - dy,
        },
        ResizeEdge::SouthEast => WindowRect {
            w: start.w + dx,
            h: start.h + dy,
            ..start
        },
        ResizeEdge::SouthWest => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            h: start.h + dy,
            ..start
        },
    }
}

/// Issues the next z-index: above every record and above anything issued before.
pub fn issue_z_index(state: &mut WindowState) -> u32 {
    let above_collection = state
        .windows
        .iter()
        .map(|w| w.z_index.saturating_add(1))
        .max()
        .unwrap_or(crate::model::BASE_Z_INDEX);
    let z_index = above_collection.max(state.next_z_index);
    state.next_z_index = z_index.saturating_add(1);
    z_index
}

/// Focuses and raises `window_id`.
///
/// Missing and minimized targets are ignored. Focusing the window that is already focused and
/// topmost leaves the stack untouched. Returns `true` when stack/focus state changed.
pub fn focus_window_internal(state: &mut WindowState, window_id: WindowId) -> bool {
    let top = state.windows.iter().map(|w| w.z_index).max();
    let Some(target) = state.window(window_id) else {
        return false;
    };
    if target.is_minimized {
        return false;
    }
    if state.focused == Some(window_id) && target.is_focused && Some(target.z_index) == top {
        return false;
    }

    let z_index = issue_z_index(state);
    for window in &mut state.windows {
        window.is_focused = window.id == window_id;
        if window.id == window_id {
            window.z_index = z_index;
        }
    }
    state.focused = Some(window_id);
    true
}

/// Re-derives per-record focus flags from the focus pointer.
///
/// A pointer naming a missing or minimized window is cleared; focus is never moved to another
/// window.
pub fn normalize_focus(state: &mut WindowState) {
    if let Some(focused) = state.focused {
        let valid = state
            .window(focused)
            .map(|w| !w.is_minimized)
            .unwrap_or(false);
        if !valid {
            state.focused = None;
        }
    }
    for window in &mut state.windows {
        window.is_focused = state.focused == Some(window.id);
    }
}

/// Normalizes a loaded window list before it becomes live state.
///
/// Sizes are raised to the minimum window size. z-indices are renumbered from
/// [`BASE_Z_INDEX`](crate::model::BASE_Z_INDEX) in their existing stacking order (ties keep list
/// order), so the issued-value counter always has headroom after a load.
pub fn normalize_loaded_stack(windows: &mut [WindowRecord]) {
    let mut order: Vec<usize> = (0..windows.len()).collect();
    order.sort_by_key(|&idx| windows[idx].z_index);
    for (rank, idx) in order.into_iter().enumerate() {
        let window = &mut windows[idx];
        window.z_index = crate::model::BASE_Z_INDEX.saturating_add(rank as u32);
        window.size.width = window.size.width.max(MIN_WINDOW_WIDTH);
        window.size.height = window.size.height.max(MIN_WINDOW_HEIGHT);
    }
}

/// Focus target after loading a persisted layout: the most recently created non-minimized
/// window.
pub fn restore_focus_target(windows: &[WindowRecord]) -> Option<WindowId> {
    windows
        .iter()
        .filter(|w| !w.is_minimized)
        .max_by_key(|w| w.created_at)
        .map(|w| w.id)
}
