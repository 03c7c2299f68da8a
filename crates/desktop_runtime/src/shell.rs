//! Shell-side command surface: start menu, taskbar, and title-bar buttons.
//!
//! Rendering is left to the host. This module only owns the shell's own transient UI state
//! (which menu is open) and routes each button click to the matching [`WindowStore`] operation.

use crate::{
    model::{PointerPosition, WindowId, WindowSnapshot},
    store::WindowStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartMenuEntry {
    pub title: &'static str,
    pub icon: &'static str,
}

const START_MENU: [StartMenuEntry; 5] = [
    StartMenuEntry {
        title: "Document Editor",
        icon: "📄",
    },
    StartMenuEntry {
        title: "Image Viewer",
        icon: "🎨",
    },
    StartMenuEntry {
        title: "Data Analytics",
        icon: "📊",
    },
    StartMenuEntry {
        title: "Web Browser",
        icon: "🌐",
    },
    StartMenuEntry {
        title: "Music Player",
        icon: "🎵",
    },
];

pub fn start_menu_entries() -> &'static [StartMenuEntry] {
    &START_MENU
}

/// One taskbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarItem {
    pub window_id: WindowId,
    pub title: String,
    pub icon: String,
    pub is_focused: bool,
    pub is_minimized: bool,
}

/// Taskbar buttons for every window, minimized or not, in the order they were opened.
pub fn taskbar_items(snapshot: &WindowSnapshot) -> Vec<TaskbarItem> {
    snapshot
        .windows
        .iter()
        .map(|w| TaskbarItem {
            window_id: w.id,
            title: w.title.clone(),
            icon: w.icon.clone(),
            is_focused: snapshot.focused == Some(w.id),
            is_minimized: w.is_minimized,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextMenuTarget {
    pub window_id: WindowId,
    pub anchor: PointerPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// User intents raised by shell chrome.
pub enum ShellCommand {
    ToggleStartMenu,
    CloseStartMenu,
    /// Start-menu entry clicked.
    Launch(StartMenuEntry),
    /// Left click on a taskbar button.
    ActivateTaskbarItem(WindowId),
    /// Right click on a taskbar button.
    OpenContextMenu {
        window_id: WindowId,
        anchor: PointerPosition,
    },
    ContextMenuRestore,
    ContextMenuClose,
    DismissContextMenu,
    TitleBarMinimize(WindowId),
    TitleBarToggleMaximize(WindowId),
    TitleBarClose(WindowId),
    /// Click anywhere inside a window body.
    WindowClicked(WindowId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellState {
    pub start_menu_open: bool,
    pub context_menu: Option<ContextMenuTarget>,
}

impl ShellState {
    /// Applies a shell command, forwarding window operations to `store`.
    ///
    /// Returns the id of the window opened by a [`ShellCommand::Launch`].
    pub fn handle(&mut self, store: &mut WindowStore, command: ShellCommand) -> Option<WindowId> {
        match command {
            ShellCommand::ToggleStartMenu => {
                self.start_menu_open = !self.start_menu_open;
            }
            ShellCommand::CloseStartMenu => {
                self.start_menu_open = false;
            }
            ShellCommand::Launch(entry) => {
                self.start_menu_open = false;
                return Some(store.open(entry.title, entry.icon));
            }
            // Taskbar clicks always restore, which also raises an already visible window.
            ShellCommand::ActivateTaskbarItem(window_id) => store.restore(window_id),
            ShellCommand::OpenContextMenu { window_id, anchor } => {
                self.context_menu = Some(ContextMenuTarget { window_id, anchor });
            }
            ShellCommand::ContextMenuRestore => {
                if let Some(target) = self.context_menu.take() {
                    store.restore(target.window_id);
                }
            }
            ShellCommand::ContextMenuClose => {
                if let Some(target) = self.context_menu.take() {
                    store.close(target.window_id);
                }
            }
            ShellCommand::DismissContextMenu => {
                self.context_menu = None;
            }
            ShellCommand::TitleBarMinimize(window_id) => store.minimize(window_id),
            ShellCommand::TitleBarToggleMaximize(window_id) => store.toggle_maximize(window_id),
            ShellCommand::TitleBarClose(window_id) => store.close(window_id),
            ShellCommand::WindowClicked(window_id) => store.focus(window_id),
        }
        None
    }
}
