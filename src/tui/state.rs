//! Front-end state that is not part of the controller
//!
//! The controller owns the value and the dropdown; this holds the text
//! cursor and the geometry of the last rendered suggestion list, which mouse
//! handling needs to map a click back to a suggestion.

use ratatui::layout::Rect;

/// Cursor and layout bookkeeping for the terminal front end
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// Cursor position (character index, not byte)
    pub cursor: usize,
    /// Area of the suggestion rows, set during render
    pub list_area: Option<Rect>,
    /// Index of the first suggestion drawn in `list_area`
    pub scroll_offset: usize,
}

impl EditorState {
    /// State with the cursor at the end of `value`
    #[must_use]
    pub fn at_end_of(value: &str) -> Self {
        Self {
            cursor: value.chars().count(),
            ..Self::default()
        }
    }

    /// Move cursor left
    pub const fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right, stopping at the end of `value`
    pub fn cursor_right(&mut self, value: &str) {
        if self.cursor < value.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to the end of `value`
    pub fn cursor_end(&mut self, value: &str) {
        self.cursor = value.chars().count();
    }

    /// Keep `selected` inside a window of `height` rows
    pub const fn adjust_scroll(&mut self, selected: Option<usize>, height: usize) {
        let Some(selected) = selected else {
            self.scroll_offset = 0;
            return;
        };

        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if height > 0 && selected >= self.scroll_offset + height {
            self.scroll_offset = selected + 1 - height;
        }
    }

    /// Suggestion index under a screen position
    #[must_use]
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area?;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;

        inside.then(|| self.scroll_offset + usize::from(row - area.y))
    }
}
