use crate::interactive::ui::components::{Component, Styles};
use crate::interactive::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub const OVERLAY_PLACEHOLDER: &str = "Search repos, issues, notes, events…";

/// The overlay's query input, with readline-style editing keys.
#[derive(Default)]
pub struct SearchBar {
    query: String,
    cursor_position: usize,
    is_fetching: bool,
    close_area: Rect,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Syncs the text from app state. The cursor only moves when the text
    /// was changed from outside.
    pub fn set_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.cursor_position = self.char_count();
        }
    }

    pub fn set_fetching(&mut self, is_fetching: bool) {
        self.is_fetching = is_fetching;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Where the close button was drawn last frame.
    pub fn close_area(&self) -> Rect {
        self.close_area
    }

    fn char_count(&self) -> usize {
        self.query.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    /// Find the previous word boundary from the given position
    fn find_prev_word_boundary(&self, from: usize) -> usize {
        let chars: Vec<char> = self.query.chars().collect();
        let mut pos = from;

        while pos > 0 && chars.get(pos - 1).is_some_and(|c| c.is_whitespace()) {
            pos -= 1;
        }
        while pos > 0 && chars.get(pos - 1).is_some_and(|c| !c.is_whitespace()) {
            pos -= 1;
        }
        pos
    }

    /// Find the next word boundary from the given position
    fn find_next_word_boundary(&self, from: usize) -> usize {
        let chars: Vec<char> = self.query.chars().collect();
        let len = chars.len();
        let mut pos = from;

        while pos < len && chars.get(pos).is_some_and(|c| !c.is_whitespace()) {
            pos += 1;
        }
        while pos < len && chars.get(pos).is_some_and(|c| c.is_whitespace()) {
            pos += 1;
        }
        pos
    }

    /// Removes the characters in `start..end` and leaves the cursor at
    /// `start`. Returns the change message when anything was removed.
    fn delete_range(&mut self, start: usize, end: usize) -> Option<Message> {
        if start >= end || end > self.char_count() {
            return None;
        }
        let byte_start = self.byte_index(start);
        let byte_end = self.byte_index(end);
        self.query.drain(byte_start..byte_end);
        self.cursor_position = start;
        Some(self.changed())
    }

    fn insert(&mut self, c: char) -> Message {
        let byte_pos = self.byte_index(self.cursor_position);
        self.query.insert(byte_pos, c);
        self.cursor_position += 1;
        self.changed()
    }

    fn changed(&self) -> Message {
        Message::QueryChanged(self.query.clone())
    }
}

impl Component for SearchBar {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);

        let input_text = if self.query.is_empty() {
            vec![
                Span::styled(" ", cursor_style),
                Span::styled(OVERLAY_PLACEHOLDER, Styles::dimmed()),
            ]
        } else {
            let byte_pos = self.byte_index(self.cursor_position);
            let (before, rest) = self.query.split_at(byte_pos);
            let mut rest_chars = rest.chars();
            let under = rest_chars.next().unwrap_or(' ');
            vec![
                Span::raw(before.to_string()),
                Span::styled(under.to_string(), cursor_style),
                Span::raw(rest_chars.as_str().to_string()),
            ]
        };

        let mut title = "Search".to_string();
        if self.is_fetching {
            title.push_str(" - searching…");
        }

        let input = Paragraph::new(Line::from(input_text))
            .block(Block::default().title(title).borders(Borders::ALL))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(input, area);

        // Close button inside the right border
        if area.width > 6 && area.height > 2 {
            self.close_area = Rect::new(area.x + area.width - 4, area.y + 1, 3, 1);
            f.render_widget(
                Paragraph::new(Span::styled(" ✕ ", Styles::dimmed())),
                self.close_area,
            );
        } else {
            self.close_area = Rect::default();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor_position = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor_position = self.char_count();
                    None
                }
                KeyCode::Char('b') => {
                    self.cursor_position = self.cursor_position.saturating_sub(1);
                    None
                }
                KeyCode::Char('f') => {
                    self.cursor_position = (self.cursor_position + 1).min(self.char_count());
                    None
                }
                KeyCode::Char('h') => {
                    let pos = self.cursor_position;
                    self.delete_range(pos.saturating_sub(1), pos)
                }
                KeyCode::Char('d') => {
                    let pos = self.cursor_position;
                    self.delete_range(pos, pos + 1)
                }
                KeyCode::Char('w') => {
                    let start = self.find_prev_word_boundary(self.cursor_position);
                    self.delete_range(start, self.cursor_position)
                }
                KeyCode::Char('u') => self.delete_range(0, self.cursor_position),
                KeyCode::Char('k') => self.delete_range(self.cursor_position, self.char_count()),
                _ => None,
            };
        }

        if key.modifiers.contains(KeyModifiers::ALT) {
            return match key.code {
                KeyCode::Char('b') => {
                    self.cursor_position = self.find_prev_word_boundary(self.cursor_position);
                    None
                }
                KeyCode::Char('f') => {
                    self.cursor_position = self.find_next_word_boundary(self.cursor_position);
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some(self.insert(c)),
            KeyCode::Backspace => {
                let pos = self.cursor_position;
                self.delete_range(pos.saturating_sub(1), pos)
            }
            KeyCode::Delete => {
                let pos = self.cursor_position;
                self.delete_range(pos, pos + 1)
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor_position = (self.cursor_position + 1).min(self.char_count());
                None
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                None
            }
            KeyCode::End => {
                self.cursor_position = self.char_count();
                None
            }
            _ => None,
        }
    }
}
