use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::Layout;

/// Help overlay showing keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame) {
        let popup_area = Layout::popup(frame.area(), 46, 28);
        frame.render_widget(Clear, popup_area);

        let help_text = vec![
            Line::from(Span::styled(
                "Keybindings",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Self::section("Navigation"),
            Self::key_line("j/↓", "Next activity"),
            Self::key_line("k/↑", "Previous activity"),
            Self::key_line("g/G", "First / last"),
            Self::key_line("Ctrl+d/u", "Page down / up"),
            Line::from(""),
            Self::section("Selection"),
            Self::key_line("Space", "Toggle activity"),
            Self::key_line("a", "Select all"),
            Self::key_line("d", "Deselect all"),
            Self::key_line("r", "Retain / remove"),
            Self::key_line("m", "Match any / all"),
            Line::from(""),
            Self::section("Filter"),
            Self::key_line("Enter", "Apply filter"),
            Self::key_line("u", "Undo"),
            Self::key_line("Ctrl+r", "Redo"),
            Self::key_line("x", "Clear all filters"),
            Self::key_line("s", "Save filter"),
            Self::key_line("l", "Saved filters"),
            Line::from(""),
            Self::key_line("Esc", "Dismiss message"),
            Self::key_line("?", "Toggle this help"),
            Self::key_line("q", "Quit"),
        ];

        let help_widget = Paragraph::new(help_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(
                    " Help ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
        );

        frame.render_widget(help_widget, popup_area);
    }

    fn section(title: &str) -> Line<'_> {
        Line::from(Span::styled(title, Style::default().fg(Color::Yellow)))
    }

    fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("  {:>9}", key), Style::default().fg(Color::Green)),
            Span::styled(format!("  {}", desc), Style::default().fg(Color::White)),
        ])
    }
}
