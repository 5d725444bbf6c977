//! Single-line text field widget

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Editing state for one text input; the value itself lives in the form
#[derive(Debug, Clone)]
pub struct TextField {
    pub name: &'static str,
    pub label: &'static str,
    pub masked: bool,
    /// Cursor position in characters
    cursor_pos: usize,
}

impl TextField {
    pub fn new(name: &'static str, label: &'static str, masked: bool) -> Self {
        Self {
            name,
            label,
            masked,
            cursor_pos: 0,
        }
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    /// Put the cursor after the last character of `value`
    pub fn move_to_end(&mut self, value: &str) {
        self.cursor_pos = value.chars().count();
    }

    /// Apply a key to `value`, returning true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode, value: &mut String) -> bool {
        let len = value.chars().count();
        self.cursor_pos = self.cursor_pos.min(len);

        match key {
            KeyCode::Char(c) => {
                value.insert(byte_index(value, self.cursor_pos), c);
                self.cursor_pos += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    value.remove(byte_index(value, self.cursor_pos));
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor_pos < len {
                    value.remove(byte_index(value, self.cursor_pos));
                }
                true
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                if self.cursor_pos < len {
                    self.cursor_pos += 1;
                }
                true
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                true
            }
            KeyCode::End => {
                self.cursor_pos = len;
                true
            }
            _ => false,
        }
    }

    /// Text shown in the input box
    pub fn display_value(&self, value: &str, focused: bool) -> String {
        let mut text: String = if self.masked {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        if focused {
            let at = byte_index(&text, self.cursor_pos.min(text.chars().count()));
            text.insert(at, '|');
        }
        text
    }

    /// Rows needed: label, boxed input, error line
    pub fn render_height(&self) -> u16 {
        5
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        value: &str,
        error: Option<&str>,
        focused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Label
                Constraint::Length(3), // Input
                Constraint::Length(1), // Error
            ])
            .split(area);

        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(self.label, label_style),
                Span::styled(" *", Style::default().fg(Color::Red)),
            ])),
            chunks[0],
        );

        let border_color = match (error.is_some(), focused) {
            (true, _) => Color::Red,
            (false, true) => Color::Cyan,
            (false, false) => Color::Gray,
        };
        let input = Paragraph::new(self.display_value(value, focused))
            .style(Style::default().fg(if focused { Color::White } else { Color::Gray }))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );
        frame.render_widget(input, chunks[1]);

        if let Some(message) = error {
            frame.render_widget(
                Paragraph::new(Span::styled(message, Style::default().fg(Color::Red))),
                chunks[2],
            );
        }
    }
}

fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices().nth(char_pos).map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut field = TextField::new("firstName", "First name", false);
        let mut value = String::new();
        for c in "Ada".chars() {
            assert!(field.handle_key(KeyCode::Char(c), &mut value));
        }
        assert_eq!(value, "Ada");
        field.handle_key(KeyCode::Backspace, &mut value);
        assert_eq!(value, "Ad");
        assert_eq!(field.cursor_pos(), 2);
    }

    #[test]
    fn test_insert_in_middle_with_multibyte_chars() {
        let mut field = TextField::new("lastName", "Last name", false);
        let mut value = "Zoë".to_string();
        field.move_to_end(&value);
        field.handle_key(KeyCode::Left, &mut value);
        field.handle_key(KeyCode::Char('x'), &mut value);
        assert_eq!(value, "Zoxë");
        field.handle_key(KeyCode::End, &mut value);
        field.handle_key(KeyCode::Backspace, &mut value);
        assert_eq!(value, "Zox");
    }

    #[test]
    fn test_delete_and_home() {
        let mut field = TextField::new("email", "Email", false);
        let mut value = "abc".to_string();
        field.handle_key(KeyCode::Home, &mut value);
        field.handle_key(KeyCode::Delete, &mut value);
        assert_eq!(value, "bc");
    }

    #[test]
    fn test_unhandled_key() {
        let mut field = TextField::new("email", "Email", false);
        let mut value = String::new();
        assert!(!field.handle_key(KeyCode::Tab, &mut value));
    }

    #[test]
    fn test_masked_display() {
        let mut field = TextField::new("password", "Password", true);
        let value = "secret";
        field.move_to_end(value);
        assert_eq!(field.display_value(value, false), "******");
        assert_eq!(field.display_value(value, true), "******|");
    }

    #[test]
    fn test_cursor_clamped_after_external_change() {
        let mut field = TextField::new("email", "Email", false);
        let mut value = "abcdef".to_string();
        field.move_to_end(&value);
        value.truncate(2);
        field.handle_key(KeyCode::Char('z'), &mut value);
        assert_eq!(value, "abz");
    }
}
