//! Search input widget.
//!
//! This widget owns the raw query text and the editing cursor. Every edit is
//! reported back to the host so the session and the debounce timer stay in
//! sync; the widget itself never talks to the network.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// Editing state for the query line.
///
/// The cursor is tracked in characters, not bytes, so multi-byte input
/// edits cleanly.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    /// Current input text.
    input: String,
    /// Cursor position, in characters.
    cursor_pos: usize,
}

impl SearchBox {
    /// Create an empty search box.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the input is empty.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset();
        self.input.insert(offset, c);
        self.cursor_pos += 1;
    }

    /// Insert pasted text at the cursor position.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let offset = self.byte_offset();
            self.input.remove(offset);
        }
    }

    /// Clear all input.
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
    }

    /// Move cursor left.
    pub fn move_cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.input.chars().count() {
            self.cursor_pos += 1;
        }
    }

    /// Byte offset of the cursor into the input.
    fn byte_offset(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(offset, _)| offset)
            .unwrap_or(self.input.len())
    }

    /// Render the input line.
    ///
    /// Shows a placeholder while empty and a loading marker in the title
    /// while a request is in flight.
    pub fn render(&self, area: Rect, buf: &mut Buffer, loading: bool) {
        let title = if loading {
            "Search (searching...)"
        } else {
            "Search"
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let paragraph = if self.input.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "Search...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )))
        } else {
            Paragraph::new(format!("> {}", self.input)).style(Style::default().fg(Color::Yellow))
        };
        paragraph.render(inner, buf);
    }
}
