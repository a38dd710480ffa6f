//! Input field and suggestion dropdown widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Single-line input showing the value with a cursor
pub struct InputField<'a> {
    value: &'a str,
    cursor: usize,
    prompt: &'a str,
}

impl<'a> InputField<'a> {
    /// Create a new input field widget
    #[must_use]
    pub const fn new(value: &'a str, cursor: usize, prompt: &'a str) -> Self {
        Self {
            value,
            cursor,
            prompt,
        }
    }
}

impl Widget for InputField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.prompt));

        let inner = block.inner(area);
        block.render(area, buf);

        let before: String = self.value.chars().take(self.cursor).collect();
        let at: String = self.value.chars().skip(self.cursor).take(1).collect();
        let after: String = self.value.chars().skip(self.cursor + 1).collect();
        let at = if at.is_empty() { " ".to_string() } else { at };

        let line = Line::from(vec![
            Span::raw(before),
            Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(after),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}

/// Dropdown of visible suggestions with the highlighted row marked
pub struct SuggestionList<'a> {
    suggestions: &'a [String],
    highlighted: Option<usize>,
    offset: usize,
}

impl<'a> SuggestionList<'a> {
    /// Create a new suggestion list widget
    #[must_use]
    pub const fn new(suggestions: &'a [String], highlighted: Option<usize>, offset: usize) -> Self {
        Self {
            suggestions,
            highlighted,
            offset,
        }
    }

    /// Rows the list needs for `count` suggestions, borders included
    #[must_use]
    pub fn height_for(count: usize, max_visible: usize) -> u16 {
        u16::try_from(count.min(max_visible)).unwrap_or(u16::MAX).saturating_add(2)
    }
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem<'_>> = self
            .suggestions
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(usize::from(inner.height))
            .map(|(idx, suggestion)| {
                let is_highlighted = self.highlighted == Some(idx);
                let style = if is_highlighted {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if is_highlighted { "▶ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(suggestion.as_str(), style),
                ]))
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_height_for() {
        assert_eq!(SuggestionList::height_for(3, 8), 5);
        assert_eq!(SuggestionList::height_for(20, 8), 10);
        assert_eq!(SuggestionList::height_for(0, 8), 2);
    }

    #[test]
    fn test_list_marks_highlight() {
        let suggestions = vec!["apple".to_string(), "banana".to_string()];
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);

        SuggestionList::new(&suggestions, Some(1), 0).render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("  apple"));
        assert!(row_text(&buf, 2).contains("▶ banana"));
    }

    #[test]
    fn test_input_field_shows_value() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);

        InputField::new("alien", 5, "Movie").render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("Movie"));
        assert!(row_text(&buf, 1).contains("alien"));
    }
}
