use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use logsift_filter::SessionState;

use crate::app::AppState;
use crate::ui::components::{ActivityTable, CriteriaPanel, StatusBar, filter_hints};
use crate::ui::{Layout, Theme};

/// Activity filter screen
pub struct FilterScreen;

impl FilterScreen {
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let (header, content, message, status) = Layout::main(frame.area());
        let (table_area, panel_area) = Layout::filter_content(content);

        Self::render_header(frame, header, state);

        let title = format!(
            " Activities ({}/{}) ",
            state.table.rows().len(),
            state.session.source().len()
        );
        frame.render_stateful_widget(ActivityTable::new(&title), table_area, &mut state.table);

        let visible_checked = state.visible_checked();
        frame.render_widget(
            CriteriaPanel::new(&state.session).visible_checked(visible_checked),
            panel_area,
        );

        Self::render_message(frame, message, state);

        let right = if state.table.is_loading() {
            format!("{} applying", state.table.spinner())
        } else {
            format!("{} saved", state.saved_filters.len())
        };
        frame.render_widget(
            StatusBar::new()
                .hints(filter_hints(state.session.can_undo(), state.session.can_redo()))
                .right(right),
            status,
        );
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
        let (badge, style) = match state.session.state() {
            SessionState::Empty => ("unfiltered", Theme::text_dim()),
            SessionState::Filtered => ("filtered", Theme::text_highlight()),
        };

        let header = Paragraph::new(Line::from(vec![
            Span::styled(" logsift ", Theme::title()),
            Span::styled("│ ", Theme::text_dim()),
            Span::styled(state.session.log_name().to_string(), Theme::text()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(badge, style),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(
                format!(
                    "step {}/{}",
                    state.session.history().position() + 1,
                    state.session.history().len()
                ),
                Theme::text_dim(),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

        frame.render_widget(header, area);
    }

    fn render_message(frame: &mut Frame, area: Rect, state: &AppState) {
        if let Some(message) = &state.ui_state.message {
            let line = Line::from(vec![
                Span::styled(format!(" {}", message.text), Theme::message(message.kind)),
                Span::styled("  [Esc]", Theme::text_dim()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsift_filter::{FilterSession, Item};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| FilterScreen::render(frame, state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn state() -> AppState {
        AppState::new(FilterSession::new(
            "orders.xes",
            vec![
                Item::new("Create order", 120, 60.0),
                Item::new("Ship order", 80, 40.0),
            ],
        ))
    }

    #[test]
    fn test_render_shows_log_and_rows() {
        let mut state = state();
        let text = screen_text(&mut state);
        assert!(text.contains("orders.xes"));
        assert!(text.contains("unfiltered"));
        assert!(text.contains("step 0/0"));
        assert!(text.contains("Create order"));
        assert!(text.contains("Ship order"));
        assert!(text.contains("0 of 2 activities selected"));
    }

    #[test]
    fn test_render_after_apply() {
        let mut state = state();
        state.toggle_current();
        state.session.apply().unwrap();
        state.refresh_table();

        let text = screen_text(&mut state);
        assert!(text.contains("│ filtered"));
        assert!(text.contains("step 1/1"));
        assert!(text.contains("(1/2)"));
        assert!(!text.contains("Ship order"));
    }
}
