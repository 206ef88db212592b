use crate::interactive::ui::components::{Component, Styles, hit};
use crate::interactive::ui::events::Message;
use crate::schemas::{GlobalSearchFilters, SearchResultKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};

const BADGE_GAP: u16 = 1;

/// The "All" badge followed by one badge per kind.
#[derive(Default)]
pub struct KindFilter {
    filters: GlobalSearchFilters,
    cursor: usize,
    show_cursor: bool,
    badge_areas: Vec<Rect>,
}

impl KindFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_filters(&mut self, filters: &GlobalSearchFilters) {
        self.filters = filters.clone();
    }

    /// Cursor position; only drawn once the user has moved it.
    pub fn set_cursor(&mut self, cursor: usize, show: bool) {
        self.cursor = cursor;
        self.show_cursor = show;
    }

    fn labels() -> impl Iterator<Item = &'static str> {
        std::iter::once("All").chain(SearchResultKind::ALL.iter().map(|k| k.label()))
    }

    fn is_active(&self, badge: usize) -> bool {
        match badge {
            0 => self.filters.is_empty(),
            n => SearchResultKind::ALL
                .get(n - 1)
                .is_some_and(|kind| self.filters.kinds.contains(kind)),
        }
    }

    /// What clicking badge `badge` does.
    pub fn badge_message(badge: usize) -> Option<Message> {
        match badge {
            0 => Some(Message::ClearKinds),
            n => SearchResultKind::ALL
                .get(n - 1)
                .map(|&kind| Message::ToggleKind(kind)),
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<Message> {
        let badge = self
            .badge_areas
            .iter()
            .position(|area| hit(*area, column, row))?;
        Self::badge_message(badge)
    }
}

impl Component for KindFilter {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        self.badge_areas.clear();
        let mut spans = Vec::new();
        let mut x = area.x;

        for (badge, label) in Self::labels().enumerate() {
            let text = format!(" {label} ");
            let width = text.chars().count() as u16;
            let mut style = if self.is_active(badge) {
                Styles::badge_active()
            } else {
                Styles::dimmed()
            };
            if self.show_cursor && badge == self.cursor {
                style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
            }

            let visible = x.saturating_add(width).min(area.x + area.width);
            self.badge_areas
                .push(Rect::new(x, area.y, visible.saturating_sub(x), area.height.min(1)));

            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" ".repeat(BADGE_GAP as usize)));
            x = x.saturating_add(width + BADGE_GAP);
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Tab => Some(Message::BadgeCursorNext),
            KeyCode::BackTab => Some(Message::BadgeCursorPrevious),
            KeyCode::Char(' ') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::ToggleBadgeAtCursor)
            }
            KeyCode::Null => Some(Message::ToggleBadgeAtCursor),
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => c
                .to_digit(10)
                .and_then(|d| Self::badge_message(d as usize)),
            _ => None,
        }
    }
}
