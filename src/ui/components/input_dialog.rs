use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Theme;

const MASK: char = '●';

/// Editable single-line text field (password, SSID, filter)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    input: String,
    /// Cursor position in chars, not bytes
    cursor: usize,
    masked: bool,
    revealed: bool,
    max_chars: Option<usize>,
}

impl InputField {
    pub fn new(masked: bool, max_chars: Option<usize>) -> Self {
        Self {
            masked,
            max_chars,
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.revealed = false;
    }

    pub fn value(&self) -> &str {
        &self.input
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    fn len_chars(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map_or(self.input.len(), |(i, _)| i)
    }

    pub fn insert_char(&mut self, c: char) {
        if self.max_chars.is_some_and(|max| self.len_chars() >= max) {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.input.insert(idx, c);
        self.cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.input.remove(idx);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.len_chars() {
            let idx = self.byte_index(self.cursor);
            self.input.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len_chars());
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len_chars();
    }

    pub fn toggle_reveal(&mut self) {
        self.revealed = !self.revealed;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Apply an editing key. Returns false if the key is not an edit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_start(),
            KeyCode::End => self.move_end(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c)
            }
            _ => return false,
        }
        true
    }

    /// Text as it should appear on screen
    pub fn display(&self) -> String {
        if self.masked && !self.revealed {
            MASK.to_string().repeat(self.len_chars())
        } else {
            self.input.clone()
        }
    }

    /// Display column of the cursor
    fn cursor_column(&self) -> u16 {
        let shown = if self.masked && !self.revealed {
            self.cursor
        } else {
            self.input[..self.byte_index(self.cursor)].width()
        };
        shown.min(u16::MAX as usize) as u16
    }

    /// Render `label` followed by the field on one row
    pub fn render(&self, f: &mut Frame, area: Rect, label: &str, focused: bool, theme: &Theme) {
        let label_style = if focused {
            theme.style_accent()
        } else {
            theme.style_dim()
        };
        let line = Line::from(vec![
            Span::styled(label.to_string(), label_style),
            Span::styled(self.display(), theme.style_default()),
        ]);
        f.render_widget(Paragraph::new(line), area);

        if focused {
            let x = area.x + label.width() as u16 + self.cursor_column();
            if x < area.x + area.width {
                f.set_cursor_position((x, area.y));
            }
        }
    }
}
