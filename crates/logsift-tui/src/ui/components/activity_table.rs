use std::collections::HashSet;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, StatefulWidget, Table, TableState},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use logsift_filter::{Item, Renderer, SelectionSet};

use crate::ui::Theme;

/// Spinner frames for the loading indicator
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Rows currently shown in the activity table, with checkbox state
#[derive(Debug, Default)]
pub struct ActivityTableState {
    rows: Vec<Item>,
    checked: HashSet<String>,
    loading: bool,
    spinner: usize,
    pub table_state: TableState,
}

impl ActivityTableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Item] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_checked(&self, name: &str) -> bool {
        self.checked.contains(name)
    }

    /// Name of the row under the cursor
    pub fn cursor_name(&self) -> Option<&str> {
        self.table_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|item| item.name.as_str())
    }

    /// Move the cursor by `delta` rows, clamped to the table
    pub fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.table_state.select(None);
            return;
        }
        let last = self.rows.len() - 1;
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        self.table_state.select(Some(next));
    }

    pub fn cursor_top(&mut self) {
        if !self.rows.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    pub fn cursor_bottom(&mut self) {
        if !self.rows.is_empty() {
            self.table_state.select(Some(self.rows.len() - 1));
        }
    }

    /// Advance the loading spinner
    pub fn tick(&mut self) {
        if self.loading {
            self.spinner = (self.spinner + 1) % SPINNER.len();
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER[self.spinner]
    }
}

impl Renderer for ActivityTableState {
    fn show_items(&mut self, items: &[Item], selection: &SelectionSet) {
        let cursor = self.cursor_name().map(str::to_string);

        self.rows = items.to_vec();
        self.checked = items
            .iter()
            .filter(|i| selection.contains(&i.name))
            .map(|i| i.name.clone())
            .collect();

        // Keep the cursor on the same activity when it is still shown
        let index = cursor
            .and_then(|name| self.rows.iter().position(|i| i.name == name))
            .or(if self.rows.is_empty() { None } else { Some(0) });
        let index = index.map(|i| i.min(self.rows.len().saturating_sub(1)));
        self.table_state.select(index);
    }

    fn checked(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|i| self.checked.contains(&i.name))
            .map(|i| i.name.clone())
            .collect()
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.spinner = 0;
    }
}

/// Checkbox table of activities
pub struct ActivityTable<'a> {
    title: &'a str,
}

impl<'a> ActivityTable<'a> {
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }
}

impl StatefulWidget for ActivityTable<'_> {
    type State = ActivityTableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        // Name column width: area minus borders, checkbox, numbers and spacing
        let name_width = area.width.saturating_sub(2 + 4 + 8 + 11 + 3) as usize;

        let rows: Vec<Row> = state
            .rows
            .iter()
            .map(|item| {
                let checked = state.checked.contains(&item.name);
                Row::new(vec![
                    Cell::from(Span::styled(
                        if checked { "[x]" } else { "[ ]" },
                        Theme::checkbox(checked),
                    )),
                    Cell::from(truncate_to_width(&item.name, name_width)),
                    Cell::from(Line::from(item.case_count.to_string()).right_aligned()),
                    Cell::from(Line::from(format!("{:.2}%", item.frequency)).right_aligned()),
                ])
                .style(Theme::text())
            })
            .collect();

        let title = if state.loading {
            format!("{} {} ", self.title, SPINNER[state.spinner])
        } else {
            self.title.to_string()
        };

        let header = Row::new(vec!["", "Activity", "Cases", "Frequency"])
            .style(Theme::table_header());

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(8),
                Constraint::Length(11),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if state.loading {
                    Theme::border()
                } else {
                    Theme::border_focused()
                })
                .title(Span::styled(title, Theme::title())),
        )
        .row_highlight_style(Theme::row_cursor())
        .highlight_symbol("▶ ");

        StatefulWidget::render(table, area, buf, &mut state.table_state);
    }
}

/// Cut `s` to at most `max` display columns, marking the cut with `…`
fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        vec![
            Item::new("Review", 10, 50.0),
            Item::new("Approve", 8, 40.0),
            Item::new("Ship", 2, 10.0),
        ]
    }

    #[test]
    fn test_show_items_reports_checked() {
        let mut state = ActivityTableState::new();
        let mut sel = SelectionSet::new();
        sel.toggle("Ship");
        sel.toggle("Review");
        sel.toggle("Hidden");

        state.show_items(&items(), &sel);
        // Reported in row order, names not shown are left out
        assert_eq!(state.checked(), vec!["Review", "Ship"]);
        assert_eq!(state.cursor_name(), Some("Review"));
    }

    #[test]
    fn test_cursor_follows_activity() {
        let mut state = ActivityTableState::new();
        state.show_items(&items(), &SelectionSet::new());
        state.move_cursor(2);
        assert_eq!(state.cursor_name(), Some("Ship"));

        state.show_items(&items()[1..], &SelectionSet::new());
        assert_eq!(state.cursor_name(), Some("Ship"));

        state.show_items(&items()[..1], &SelectionSet::new());
        assert_eq!(state.cursor_name(), Some("Review"));

        state.show_items(&[], &SelectionSet::new());
        assert_eq!(state.cursor_name(), None);
    }

    #[test]
    fn test_move_cursor_clamps() {
        let mut state = ActivityTableState::new();
        state.show_items(&items(), &SelectionSet::new());
        state.move_cursor(-5);
        assert_eq!(state.cursor_name(), Some("Review"));
        state.move_cursor(50);
        assert_eq!(state.cursor_name(), Some("Ship"));
        state.cursor_top();
        assert_eq!(state.cursor_name(), Some("Review"));
    }

    #[test]
    fn test_loading_spinner() {
        let mut state = ActivityTableState::new();
        state.tick();
        assert_eq!(state.spinner(), "|");
        state.set_loading(true);
        state.tick();
        assert_eq!(state.spinner(), "/");
        state.set_loading(false);
        assert!(!state.is_loading());
        assert_eq!(state.spinner(), "|");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Review", 10), "Review");
        assert_eq!(truncate_to_width("Review invoice", 8), "Review …");
        assert_eq!(truncate_to_width("審査審査", 5), "審査…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
