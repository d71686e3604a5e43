use ratatui::{
    Frame,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{AppState, MessageKind};
use crate::ui::{Layout, Theme};

/// Popup asking for the name of the filter being saved
pub struct NamePrompt;

impl NamePrompt {
    pub fn render(frame: &mut Frame, state: &AppState) {
        let popup_area = Layout::popup(frame.area(), 56, 7);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![
            Line::from(vec![
                Span::styled(" Name: ", Theme::text_highlight()),
                Span::styled(state.ui_state.name_input.as_str(), Theme::text()),
                Span::styled("█", Theme::text_highlight().add_modifier(Modifier::SLOW_BLINK)),
            ]),
            Line::from(""),
        ];

        match &state.ui_state.prompt_error {
            Some(err) => lines.push(Line::from(Span::styled(
                format!(" {}", err),
                Theme::message(MessageKind::Warning),
            ))),
            None => lines.push(Line::from(Span::styled(
                format!(" {}", state.session.preview()),
                Theme::text_dim(),
            ))),
        }

        lines.push(Line::from(vec![
            Span::styled(" [Enter]", Theme::text_highlight()),
            Span::styled("Save ", Theme::text_dim()),
            Span::styled("[Esc]", Theme::text_highlight()),
            Span::styled("Cancel", Theme::text_dim()),
        ]));

        let prompt = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_focused())
                .title(Span::styled(" Save filter ", Theme::title())),
        );

        frame.render_widget(prompt, popup_area);
    }
}
