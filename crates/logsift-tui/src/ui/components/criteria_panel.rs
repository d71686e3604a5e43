use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use logsift_filter::{FilterSession, Matching};

use crate::ui::Theme;

/// Side panel describing the next apply and the history position
pub struct CriteriaPanel<'a> {
    session: &'a FilterSession,
    visible_checked: usize,
}

impl<'a> CriteriaPanel<'a> {
    pub fn new(session: &'a FilterSession) -> Self {
        Self {
            session,
            visible_checked: 0,
        }
    }

    /// Number of checked rows in the current view
    pub fn visible_checked(mut self, count: usize) -> Self {
        self.visible_checked = count;
        self
    }

    fn radio<'b>(label: &'b str, on: bool) -> Vec<Span<'b>> {
        vec![
            Span::styled(if on { " (•) " } else { " ( ) " }, Theme::text_highlight()),
            Span::styled(label, if on { Theme::text() } else { Theme::text_dim() }),
        ]
    }
}

impl Widget for CriteriaPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session;
        let history = session.history();

        let mut lines = vec![
            Line::from(Span::styled("Action [r]", Theme::text_highlight())),
            Line::from(Span::styled(
                format!(" {}", session.action.label()),
                Theme::action(session.action),
            )),
            Line::from(""),
            Line::from(Span::styled("Matching [m]", Theme::text_highlight())),
            Line::from(Self::radio(
                Matching::Any.label(),
                session.matching == Matching::Any,
            )),
            Line::from(Self::radio(
                Matching::All.label(),
                session.matching == Matching::All,
            )),
            Line::from(""),
            Line::from(Span::styled(session.preview(), Theme::text())),
            Line::from(Span::styled(
                format!("{} checked in view", self.visible_checked),
                Theme::text_dim(),
            )),
            Line::from(""),
            Line::from(Span::styled("History", Theme::text_highlight())),
            Line::from(Span::styled(
                format!(" {} of {}", history.position() + 1, history.len()),
                Theme::text(),
            )),
        ];

        match history.current() {
            Some(current) => lines.push(Line::from(Span::styled(
                format!(" {}", current.summary()),
                Theme::text_dim(),
            ))),
            None => lines.push(Line::from(Span::styled(" no filter applied", Theme::text_dim()))),
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border())
                    .title(Span::styled(" Criteria ", Theme::title())),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsift_filter::{FilterAction, Item};

    fn panel_text(session: &FilterSession) -> String {
        let area = Rect::new(0, 0, 34, 20);
        let mut buf = Buffer::empty(area);
        CriteriaPanel::new(session).render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_panel_headings() {
        let mut session = FilterSession::new("log", vec![Item::new("A", 1, 100.0)]);
        session.set_action(FilterAction::Remove);

        let text = panel_text(&session);
        assert!(text.contains("Action [r]"));
        assert!(text.contains(" Remove"));
        assert!(text.contains("Matching [m]"));
        assert!(text.contains("no filter applied"));
        assert!(!text.contains("Cases"));
    }
}
