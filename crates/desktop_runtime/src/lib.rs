//! Window-manager engine for a simulated desktop: window records, stacking and focus, pointer
//! gestures, and layout persistence.

pub mod interaction;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod shell;
pub mod store;
pub mod window_manager;

pub use interaction::InteractionController;
pub use model::*;
pub use persistence::{PersistenceBridge, PersistenceError};
pub use reducer::{reduce_windows, RuntimeEffect, WindowAction};
pub use shell::{
    start_menu_entries, taskbar_items, ShellCommand, ShellState, StartMenuEntry, TaskbarItem,
};
pub use store::{SubscriptionId, WindowListener, WindowStore};
