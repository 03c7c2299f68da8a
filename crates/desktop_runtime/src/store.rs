//! Long-lived window-state container: dispatch, change notification, and effect execution.
//!
//! [`WindowStore`] owns the window collection exclusively. Every mutation goes through
//! [`WindowStore::dispatch`], which runs the reducer against the current viewport, publishes a
//! fresh [`WindowSnapshot`] to subscribers when anything changed, and then executes the
//! reducer's effects in order.

use std::rc::Rc;

use platform_host::{PrefsStore, ViewportOracle};

use crate::{
    model::{
        DesktopPreferences, Viewport, WindowId, WindowPosition, WindowRecord, WindowRect,
        WindowSize, WindowSnapshot, WindowState,
    },
    persistence::PersistenceBridge,
    reducer::{reduce_windows, RuntimeEffect, WindowAction},
    window_manager::effective_rect,
};

/// Change listener; receives the committed snapshot after each state-changing dispatch.
pub type WindowListener = Rc<dyn Fn(&Rc<WindowSnapshot>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Handle returned by [`WindowStore::subscribe`].
pub struct SubscriptionId(u64);

/// Owned window collection plus focus pointer, exposed through an operation API.
pub struct WindowStore {
    state: WindowState,
    snapshot: Rc<WindowSnapshot>,
    viewport: Rc<dyn ViewportOracle>,
    persistence: PersistenceBridge,
    listeners: Vec<(SubscriptionId, WindowListener)>,
    next_subscription: u64,
}

impl WindowStore {
    /// Creates an empty store. Nothing is read from `prefs` until [`WindowStore::hydrate`].
    pub fn new(
        prefs: Rc<dyn PrefsStore>,
        viewport: Rc<dyn ViewportOracle>,
        preferences: &DesktopPreferences,
    ) -> Self {
        Self {
            state: WindowState::default(),
            snapshot: Rc::new(WindowSnapshot::default()),
            viewport,
            persistence: PersistenceBridge::new(prefs, preferences.storage_key.clone()),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates a store and, when `restore_on_boot` is set, loads the persisted layout.
    pub fn boot(
        prefs: Rc<dyn PrefsStore>,
        viewport: Rc<dyn ViewportOracle>,
        preferences: &DesktopPreferences,
    ) -> Self {
        let mut store = Self::new(prefs, viewport, preferences);
        if preferences.restore_on_boot {
            store.hydrate();
        }
        store
    }

    /// Replaces the collection with the persisted layout.
    ///
    /// An empty or unreadable slot leaves the current collection untouched.
    pub fn hydrate(&mut self) {
        let windows = self.persistence.load();
        if windows.is_empty() {
            return;
        }
        self.dispatch(WindowAction::Hydrate { windows });
    }

    /// Applies `action` and returns the effects it produced.
    pub fn dispatch(&mut self, action: WindowAction) -> Vec<RuntimeEffect> {
        let viewport = self.viewport.viewport();
        let effects = reduce_windows(&mut self.state, action, viewport);

        let snapshot = self.state.snapshot();
        if snapshot != *self.snapshot {
            self.snapshot = Rc::new(snapshot);
            self.notify();
        }

        for effect in &effects {
            self.run_effect(effect);
        }
        effects
    }

    fn notify(&self) {
        let listeners: Vec<WindowListener> = self
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&self.snapshot);
        }
    }

    fn run_effect(&self, effect: &RuntimeEffect) {
        match effect {
            // An emptied desktop is not written back.
            RuntimeEffect::PersistLayout if !self.state.windows.is_empty() => {
                self.persistence.save(&self.state.windows);
            }
            RuntimeEffect::PersistLayout | RuntimeEffect::WindowOpened(_) => {}
        }
    }

    /// Registers a change listener.
    pub fn subscribe(
        &mut self,
        listener: impl Fn(&Rc<WindowSnapshot>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Rc::new(listener)));
        id
    }

    /// Removes a change listener; unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(existing, _)| *existing != id);
    }

    /// Opens a focused window with default geometry and returns its id.
    pub fn open(&mut self, title: impl Into<String>, icon: impl Into<String>) -> WindowId {
        let effects = self.dispatch(WindowAction::Open {
            title: title.into(),
            icon: icon.into(),
        });
        effects
            .into_iter()
            .find_map(|effect| match effect {
                RuntimeEffect::WindowOpened(window_id) => Some(window_id),
                RuntimeEffect::PersistLayout => None,
            })
            // Open always reports the id it issued, which is the last one drawn from the counter.
            .unwrap_or_else(|| WindowId(self.state.next_window_id.saturating_sub(1)))
    }

    pub fn close(&mut self, window_id: WindowId) {
        self.dispatch(WindowAction::Close { window_id });
    }

    pub fn focus(&mut self, window_id: WindowId) {
        self.dispatch(WindowAction::Focus { window_id });
    }

    pub fn minimize(&mut self, window_id: WindowId) {
        self.dispatch(WindowAction::Minimize { window_id });
    }

    pub fn restore(&mut self, window_id: WindowId) {
        self.dispatch(WindowAction::Restore { window_id });
    }

    pub fn toggle_maximize(&mut self, window_id: WindowId) {
        self.dispatch(WindowAction::ToggleMaximize { window_id });
    }

    pub fn move_window(&mut self, window_id: WindowId, position: WindowPosition) {
        self.dispatch(WindowAction::Move {
            window_id,
            position,
        });
    }

    pub fn resize_window(&mut self, window_id: WindowId, size: WindowSize) {
        self.dispatch(WindowAction::Resize { window_id, size });
    }

    pub fn set_title(&mut self, window_id: WindowId, title: impl Into<String>) {
        self.dispatch(WindowAction::SetTitle {
            window_id,
            title: title.into(),
        });
    }

    pub fn set_icon(&mut self, window_id: WindowId, icon: impl Into<String>) {
        self.dispatch(WindowAction::SetIcon {
            window_id,
            icon: icon.into(),
        });
    }

    /// Latest committed snapshot.
    pub fn snapshot(&self) -> Rc<WindowSnapshot> {
        Rc::clone(&self.snapshot)
    }

    /// Every window in insertion order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.state.windows
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.state.window(window_id)
    }

    /// Non-minimized windows in paint order (topmost last).
    pub fn visible_windows(&self) -> Vec<WindowRecord> {
        self.snapshot.visible_windows()
    }

    /// Minimized windows in insertion order.
    pub fn minimized_windows(&self) -> Vec<WindowRecord> {
        self.snapshot.minimized_windows()
    }

    pub fn focused_id(&self) -> Option<WindowId> {
        self.state.focused_window_id()
    }

    /// Current viewport as reported by the oracle.
    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    /// Geometry to paint for `window_id`, resolving maximized windows against the live viewport.
    pub fn effective_geometry(&self, window_id: WindowId) -> Option<WindowRect> {
        let viewport = self.viewport();
        self.window(window_id)
            .map(|record| effective_rect(record, viewport))
    }

    pub fn persistence(&self) -> &PersistenceBridge {
        &self.persistence
    }
}
