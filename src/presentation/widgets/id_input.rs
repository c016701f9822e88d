//! Digit-only identifier input widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Text input field accepting only decimal digits.
///
/// Non-digit characters never enter the value: typed ones are dropped and
/// pasted text is stripped, so the visible text is always the cleaned
/// form. A clear hint is shown at the right edge whenever the field holds
/// text, mirroring the clear affordance's visibility rule.
#[derive(Debug, Clone)]
pub struct IdInput {
    value: String,
    cursor: usize,
    focused: bool,
    placeholder: String,
    label: String,
}

impl IdInput {
    /// Creates new input with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            placeholder: String::new(),
            label: label.into(),
        }
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns focus state.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Returns current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value, stripping non-digit characters.
    pub fn set_value(&mut self, value: &str) {
        self.value = crate::domain::entities::strip_non_digits(value);
        self.cursor = self.value.len();
    }

    /// Clears value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Inserts a digit at the cursor; anything else is dropped.
    ///
    /// Returns true when the value changed.
    pub fn input_char(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        self.value.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    /// Deletes character before cursor. Returns true when the value changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.value.remove(self.cursor);
            true
        } else {
            false
        }
    }

    /// Deletes character at cursor. Returns true when the value changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
            true
        } else {
            false
        }
    }

    /// Moves cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor += 1;
        }
    }

    /// Moves cursor to start.
    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    /// Moves cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Whether the clear hint is visible.
    #[must_use]
    pub fn clear_visible(&self) -> bool {
        !self.value.is_empty()
    }

    fn display_text(&self) -> String {
        if self.value.is_empty() {
            self.placeholder.clone()
        } else {
            self.value.clone()
        }
    }
}

impl Widget for &IdInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let text_style = if self.value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.as_str());

        if self.clear_visible() {
            block = block.title_top(ratatui::text::Line::from(" ✕ esc ").right_aligned());
        }

        let inner = block.inner(area);

        let display = self.display_text();
        let paragraph = Paragraph::new(display).style(text_style);

        block.render(area, buf);
        paragraph.render(inner, buf);

        if self.focused && inner.width > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let cursor_x = inner.x + self.cursor as u16;
            if cursor_x < inner.x + inner.width {
                buf[(cursor_x, inner.y)]
                    .set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}
