use ratatui::style::{Color, Modifier, Style};

use logsift_filter::FilterAction;

use crate::app::MessageKind;

/// Color theme for the application
pub struct Theme;

impl Theme {
    // Base colors
    pub const BG: Color = Color::Reset;
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;

    // Accent colors
    pub const PRIMARY: Color = Color::Cyan;
    pub const HIGHLIGHT: Color = Color::Yellow;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const INFO: Color = Color::Blue;

    pub fn border() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn text_highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    // Table
    pub fn table_header() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn row_cursor() -> Style {
        Style::default()
            .fg(Self::BG)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn checkbox(checked: bool) -> Style {
        if checked {
            Style::default().fg(Self::SUCCESS)
        } else {
            Style::default().fg(Self::FG_DIM)
        }
    }

    /// Color coding for the retain/remove toggle
    pub fn action(action: FilterAction) -> Style {
        let color = match action {
            FilterAction::Retain => Self::SUCCESS,
            FilterAction::Remove => Self::ERROR,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn message(kind: MessageKind) -> Style {
        let color = match kind {
            MessageKind::Success => Self::SUCCESS,
            MessageKind::Info => Self::INFO,
            MessageKind::Warning => Self::WARNING,
            MessageKind::Error => Self::ERROR,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    // Status bar
    pub fn status_bar() -> Style {
        Style::default().fg(Self::FG_DIM).bg(Color::DarkGray)
    }

    pub fn status_bar_key() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_disabled() -> Style {
        Style::default()
            .fg(Color::Gray)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }
}
