//! Pointer gesture state machine for window drags and edge resizes.
//!
//! One gesture is active at a time. Every pointer event is applied to the [`WindowStore`]
//! immediately, so there is nothing to flush when a gesture ends early:
//! [`InteractionController::cancel`] just forgets the session.

use crate::{
    model::{
        DragSession, GestureState, PointerPosition, ResizeEdge, ResizeSession, WindowId,
        WindowPosition, WindowRect,
    },
    store::WindowStore,
    window_manager::resize_rect,
};

#[derive(Debug, Clone, Default)]
/// Converts pointer-down/move/up streams into store move and resize calls.
pub struct InteractionController {
    state: GestureState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, GestureState::Idle)
    }

    /// Starts dragging `window_id` by its title bar.
    ///
    /// Rejected (returns `false`) while another gesture is active or when the window is missing,
    /// minimized, or maximized.
    pub fn begin_move(
        &mut self,
        store: &mut WindowStore,
        window_id: WindowId,
        pointer: PointerPosition,
    ) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(origin) = movable_rect(store, window_id).map(|rect| rect.position()) else {
            return false;
        };

        store.focus(window_id);
        self.state = GestureState::Dragging(DragSession {
            window_id,
            pointer_offset: PointerPosition {
                x: pointer.x - origin.x,
                y: pointer.y - origin.y,
            },
        });
        true
    }

    /// Starts resizing `window_id` from `edge`. Same rejection rules as [`Self::begin_move`].
    pub fn begin_resize(
        &mut self,
        store: &mut WindowStore,
        window_id: WindowId,
        edge: ResizeEdge,
        pointer: PointerPosition,
    ) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(rect_start) = movable_rect(store, window_id) else {
            return false;
        };

        store.focus(window_id);
        self.state = GestureState::Resizing(ResizeSession {
            window_id,
            edge,
            pointer_start: pointer,
            rect_start,
        });
        true
    }

    /// Applies a pointer-move to the active gesture; ignored while idle.
    pub fn pointer_move(&mut self, store: &mut WindowStore, pointer: PointerPosition) {
        match &self.state {
            GestureState::Idle => {}
            GestureState::Dragging(session) => store.move_window(
                session.window_id,
                WindowPosition {
                    x: pointer.x - session.pointer_offset.x,
                    y: pointer.y - session.pointer_offset.y,
                },
            ),
            GestureState::Resizing(session) => apply_resize(store, session, pointer),
        }
    }

    /// Ends the active gesture.
    ///
    /// A resize re-commits its final geometry so that a corner anchored against a clamp ends up
    /// consistent with the current viewport.
    pub fn pointer_up(&mut self, store: &mut WindowStore) {
        if let GestureState::Resizing(session) = std::mem::take(&mut self.state) {
            let Some(rect) = store.window(session.window_id).map(|w| w.rect()) else {
                return;
            };
            store.resize_window(session.window_id, rect.size());
            store.move_window(session.window_id, rect.position());
        }
    }

    /// Drops the active gesture without a final commit.
    ///
    /// Hosts call this when the pointer-up was lost (pointer capture released, page blur).
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}

fn movable_rect(store: &WindowStore, window_id: WindowId) -> Option<WindowRect> {
    store
        .window(window_id)
        .filter(|w| !w.is_minimized && !w.is_maximized)
        .map(|w| w.rect())
}

fn apply_resize(store: &mut WindowStore, session: &ResizeSession, pointer: PointerPosition) {
    let dx = pointer.x - session.pointer_start.x;
    let dy = pointer.y - session.pointer_start.y;
    let candidate = resize_rect(session.rect_start, session.edge, dx, dy);

    store.resize_window(session.window_id, candidate.size());
    if !(session.edge.moves_left() || session.edge.moves_top()) {
        return;
    }

    // Keep the opposite edge where it started, using the size the store actually accepted.
    let Some(applied) = store.window(session.window_id).map(|w| w.size) else {
        return;
    };
    let start = session.rect_start;
    let position = WindowPosition {
        x: if session.edge.moves_left() {
            start.x + start.w - applied.width
        } else {
            start.x
        },
        y: if session.edge.moves_top() {
            start.y + start.h - applied.height
        } else {
            start.y
        },
    };
    store.move_window(session.window_id, position);
}
