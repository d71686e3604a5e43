use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::ui::Theme;

/// A key hint; disabled hints are drawn dimmed
#[derive(Clone, Copy, Debug)]
pub struct Hint<'a> {
    pub key: &'a str,
    pub desc: &'a str,
    pub enabled: bool,
}

/// Status bar showing keyboard shortcuts
pub struct StatusBar<'a> {
    hints: Vec<Hint<'a>>,
    right_text: Option<String>,
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self {
            hints: Vec::new(),
            right_text: None,
        }
    }

    pub fn hints<I>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = Hint<'a>>,
    {
        self.hints = hints.into_iter().collect();
        self
    }

    /// Set text to display on the right side
    pub fn right<S: Into<String>>(mut self, text: S) -> Self {
        self.right_text = Some(text.into());
        self
    }
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::status_bar());

        let mut spans = Vec::new();
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Theme::status_bar()));
            }
            let (key_style, desc_style): (Style, Style) = if hint.enabled {
                (Theme::status_bar_key(), Theme::status_bar())
            } else {
                (Theme::status_bar_disabled(), Theme::status_bar_disabled())
            };
            spans.push(Span::styled(format!("[{}]", hint.key), key_style));
            spans.push(Span::styled(format!(" {}", hint.desc), desc_style));
        }

        let line = Line::from(spans);
        let line_width = line.width() as u16;
        buf.set_line(area.x + 1, area.y, &line, area.width.saturating_sub(2));

        if let Some(right) = self.right_text {
            let right_width = Line::from(right.as_str()).width() as u16;
            let right_x = area.x + area.width.saturating_sub(right_width + 2);
            if right_x > area.x + line_width + 2 {
                buf.set_span(
                    right_x,
                    area.y,
                    &Span::styled(&right, Theme::status_bar()),
                    right_width,
                );
            }
        }
    }
}

/// Hints for the filter table; undo/redo dim when unavailable
pub fn filter_hints(can_undo: bool, can_redo: bool) -> Vec<Hint<'static>> {
    let on = |key, desc| Hint {
        key,
        desc,
        enabled: true,
    };
    vec![
        on("Space", "Toggle"),
        on("Enter", "Apply"),
        Hint {
            key: "u",
            desc: "Undo",
            enabled: can_undo,
        },
        Hint {
            key: "^R",
            desc: "Redo",
            enabled: can_redo,
        },
        on("x", "Clear"),
        on("s", "Save"),
        on("?", "Help"),
        on("q", "Quit"),
    ]
}
