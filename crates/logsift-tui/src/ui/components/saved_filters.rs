use ratatui::{
    Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use crate::app::AppState;
use crate::ui::{Layout, Theme};

/// Overlay listing saved filters
pub struct SavedFiltersOverlay;

impl SavedFiltersOverlay {
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let popup_area = Layout::popup(frame.area(), 64, 20);
        frame.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = if state.saved_filters.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "No saved filters",
                Theme::text_dim(),
            )))]
        } else {
            state
                .saved_filters
                .iter()
                .map(|f| {
                    let detail = match f.criteria() {
                        Ok(c) => c.summary(),
                        Err(_) => "unreadable".to_string(),
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(f.name.clone(), Theme::text()),
                        Span::styled(
                            format!("  {}  {}", detail, f.timestamp.format("%Y-%m-%d %H:%M")),
                            Theme::text_dim(),
                        ),
                    ]))
                })
                .collect()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border_focused())
                    .title(Span::styled(" Saved filters ", Theme::title()))
                    .title_bottom(Line::from(Span::styled(
                        " [Enter]Load [D]Delete [Esc]Close ",
                        Theme::text_dim(),
                    ))),
            )
            .highlight_style(Theme::row_cursor())
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, popup_area, &mut state.ui_state.saved_list_state);
    }
}
