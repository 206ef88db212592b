use crate::interactive::ui::components::{Component, Styles, hit};
use crate::interactive::ui::events::Message;
use crate::schemas::SearchResult;
use crate::search::group_by_kind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Ranked results drawn under kind headings.
///
/// Each drawn row maps back to a flat index into the ranked list (or to
/// nothing, for headings), which is what selection and mouse hits use.
#[derive(Default)]
pub struct ResultList {
    results: Vec<SearchResult>,
    selected_index: usize,
    scroll_offset: usize,
    rows: Vec<Option<usize>>,
    area: Rect,
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_results(&mut self, results: &[SearchResult]) {
        if self.results.as_slice() == results {
            return;
        }
        self.results = results.to_vec();
        self.scroll_offset = 0;
        self.rows = group_by_kind(&self.results)
            .iter()
            .flat_map(|group| {
                std::iter::once(None).chain(group.items.iter().map(|(index, _)| Some(*index)))
            })
            .collect();
    }

    pub fn set_selected_index(&mut self, index: usize) {
        self.selected_index = index;
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Flat index per drawn row; `None` is a group heading.
    pub fn rows(&self) -> &[Option<usize>] {
        &self.rows
    }

    /// Result under a terminal cell, from the last render.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        if !hit(self.area, column, row) {
            return None;
        }
        let line = self.scroll_offset + (row - self.area.y) as usize;
        self.rows.get(line).copied().flatten()
    }

    fn adjust_scroll(&mut self, height: usize) {
        let Some(line) = self.rows.iter().position(|r| *r == Some(self.selected_index)) else {
            return;
        };
        // Keep the group heading in view when the first item is selected.
        let top = if line > 0 && self.rows[line - 1].is_none() {
            line - 1
        } else {
            line
        };
        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if height > 0 && line >= self.scroll_offset + height {
            self.scroll_offset = line + 1 - height;
        }
    }

    fn result_line(&self, result: &SearchResult, selected: bool, width: usize) -> Line<'static> {
        let kind = result.kind();
        let mut line = Line::from(vec![
            Span::raw(if selected { "▶ " } else { "  " }),
            Span::styled(format!("{} ", kind.icon()), Styles::label()),
            Span::styled(result.title.clone(), Styles::normal()),
        ]);
        match (&result.subtitle, &result.meta) {
            (Some(subtitle), _) => {
                line.spans.push(Span::styled(format!("  {subtitle}"), Styles::dimmed()));
            }
            // Without a subtitle the meta goes flush right.
            (None, Some(meta)) => {
                let meta = Span::styled(format!("{meta} "), Styles::dimmed());
                let gap = width.saturating_sub(line.width() + meta.width()).max(2);
                line.spans.push(Span::raw(" ".repeat(gap)));
                line.spans.push(meta);
            }
            (None, None) => {}
        }
        if selected {
            line.style(Styles::selected())
        } else {
            line
        }
    }
}

impl Component for ResultList {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        self.area = area;
        self.adjust_scroll(area.height as usize);

        let groups = group_by_kind(&self.results);
        let mut lines = Vec::with_capacity(self.rows.len());
        for group in &groups {
            lines.push(Line::from(Span::styled(
                group.kind.label().to_uppercase(),
                Styles::heading(),
            )));
            for (index, result) in &group.items {
                lines.push(self.result_line(
                    result,
                    *index == self.selected_index,
                    area.width as usize,
                ));
            }
        }

        let visible: Vec<Line> = lines
            .into_iter()
            .skip(self.scroll_offset)
            .take(area.height as usize)
            .collect();
        f.render_widget(Paragraph::new(visible), area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Up => Some(Message::SelectPrevious),
            KeyCode::Down => Some(Message::SelectNext),
            KeyCode::Char('p') if key.modifiers == KeyModifiers::CONTROL => {
                Some(Message::SelectPrevious)
            }
            KeyCode::Char('n') if key.modifiers == KeyModifiers::CONTROL => {
                Some(Message::SelectNext)
            }
            KeyCode::Enter => Some(Message::ActivateSelected),
            _ => None,
        }
    }
}
