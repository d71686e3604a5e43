//! TUI components for logsift
//!
//! This crate provides the terminal user interface for logsift, including
//! state management, keybindings, event handling, and UI components.

pub mod app;
pub mod config;
pub mod tui;
pub mod ui;

pub use app::{Action, AppState, Message, MessageKind, UiState};
pub use config::{KeyBinding, KeyBindings, KeyContext};
pub use tui::{Event, EventHandler, Tui};
pub use ui::components::{
    ActivityTable, ActivityTableState, CriteriaPanel, HelpOverlay, NamePrompt,
    SavedFiltersOverlay, StatusBar, filter_hints,
};
pub use ui::screens::FilterScreen;
pub use ui::{Layout, Theme};
