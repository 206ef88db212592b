use crate::interactive::constants::{OVERLAY_HEIGHT_PERCENT, OVERLAY_MAX_WIDTH, OVERLAY_TOP_MARGIN};
use crate::interactive::domain::models::OverlayView;
use crate::interactive::ui::app_state::AppState;
use crate::interactive::ui::components::{
    Component, Styles, hit, kind_filter::KindFilter, result_list::ResultList,
    search_bar::SearchBar, shell::Shell,
};
use crate::interactive::ui::events::Message;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const MIN_OVERLAY_HEIGHT: u16 = 10;

pub struct Renderer {
    shell: Shell,
    search_bar: SearchBar,
    kind_filter: KindFilter,
    result_list: ResultList,
    overlay_area: Rect,
    body_area: Rect,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            shell: Shell::new(),
            search_bar: SearchBar::new(),
            kind_filter: KindFilter::new(),
            result_list: ResultList::new(),
            overlay_area: Rect::default(),
            body_area: Rect::default(),
        }
    }

    pub fn render(&mut self, f: &mut Frame, state: &AppState) {
        self.shell.sync(state);
        self.shell.render(f, f.area());

        if state.overlay.open {
            self.render_overlay(f, state);
        } else {
            self.overlay_area = Rect::default();
            self.body_area = Rect::default();
        }
    }

    /// Where the overlay goes inside the terminal area.
    pub fn overlay_rect(area: Rect) -> Rect {
        let width = OVERLAY_MAX_WIDTH.min(area.width.saturating_sub(4)).max(area.width.min(20));
        let top = OVERLAY_TOP_MARGIN.min(area.height);
        let available = area.height - top;
        let height = (u32::from(area.height) * u32::from(OVERLAY_HEIGHT_PERCENT) / 100) as u16;
        let height = height
            .max(MIN_OVERLAY_HEIGHT)
            .min(available);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + top,
            width,
            height,
        )
    }

    fn render_overlay(&mut self, f: &mut Frame, state: &AppState) {
        let area = Self::overlay_rect(f.area());
        self.overlay_area = area;
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Global search ", Styles::title()));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Length(1), // Kind badges
                Constraint::Min(0),    // Body
                Constraint::Length(1), // Hints
            ])
            .split(inner);

        self.search_bar.set_query(&state.overlay.query);
        self.search_bar.set_fetching(state.search.is_fetching());
        self.search_bar.render(f, chunks[0]);

        self.kind_filter.set_filters(&state.overlay.filters);
        self.kind_filter
            .set_cursor(state.overlay.badge_cursor, state.overlay.badge_cursor != 0);
        self.kind_filter.render(f, chunks[1]);

        self.body_area = chunks[2];
        match state.view() {
            OverlayView::Loading => self.render_loading(f, chunks[2]),
            OverlayView::Error => self.render_error(f, chunks[2], state),
            OverlayView::Empty => self.render_empty(f, chunks[2], state),
            OverlayView::Results => {
                self.result_list.set_results(state.results());
                self.result_list.set_selected_index(state.overlay.selected_index);
                self.result_list.render(f, chunks[2]);
            }
            OverlayView::Closed => {}
        }

        let total = state.search.data().map(|d| d.total).unwrap_or(0);
        let hints = Line::from(vec![
            Span::styled(
                "↑/↓: Navigate | Enter: Open | Tab/Ctrl+Space: Filter | Alt+0-6: Kind | Esc: Close",
                Styles::dimmed(),
            ),
            Span::styled(format!("  {total} total"), Styles::label()),
        ]);
        f.render_widget(Paragraph::new(hints), chunks[3]);
    }

    fn render_loading(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(Span::styled("Searching…", Styles::dimmed()))];
        let bar = "░".repeat(area.width.saturating_sub(2) as usize);
        for _ in 0..4 {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(bar.clone(), Styles::dimmed())));
        }
        f.render_widget(Paragraph::new(lines), area);
    }

    fn render_error(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled("⚠", Styles::error())),
            Line::from(Span::styled(
                "Something went wrong loading search results.",
                Styles::normal(),
            )),
        ];
        if let Some(error) = state.search.error() {
            lines.push(Line::from(Span::styled(error.to_string(), Styles::dimmed())));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[ Try again ]  Enter or Ctrl+R",
            Styles::label(),
        )));
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_empty(&self, f: &mut Frame, area: Rect, state: &AppState) {
        let (headline, detail) = if state.overlay.debounced_query.is_empty() {
            (
                "Search across your workspace",
                "Type to search repos, issues, notes, events, transactions, and agents.",
            )
        } else {
            (
                "No results found",
                "Try a different query or change filters.",
            )
        };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(headline, Styles::normal())),
            Line::from(Span::styled(detail, Styles::dimmed())),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Maps a mouse event onto the areas drawn last frame.
    pub fn handle_mouse(&self, mouse: MouseEvent, state: &AppState) -> Option<Message> {
        let (column, row) = (mouse.column, mouse.row);

        if !state.overlay.open {
            return match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self.shell.hit_test(column, row),
                _ => None,
            };
        }

        let inside = hit(self.overlay_area, column, row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !inside {
                    return Some(Message::BackdropClicked);
                }
                if hit(self.search_bar.close_area(), column, row) {
                    return Some(Message::CloseOverlay);
                }
                if let Some(msg) = self.kind_filter.hit_test(column, row) {
                    return Some(msg);
                }
                match state.view() {
                    OverlayView::Results => self
                        .result_list
                        .hit_test(column, row)
                        .map(Message::ActivateResult),
                    OverlayView::Error if hit(self.body_area, column, row) => Some(Message::Retry),
                    _ => None,
                }
            }
            MouseEventKind::Moved if state.view() == OverlayView::Results => self
                .result_list
                .hit_test(column, row)
                .filter(|index| *index != state.overlay.selected_index)
                .map(Message::HoverResult),
            MouseEventKind::ScrollUp if inside => Some(Message::SelectPrevious),
            MouseEventKind::ScrollDown if inside => Some(Message::SelectNext),
            _ => None,
        }
    }

    pub fn get_shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    pub fn get_search_bar_mut(&mut self) -> &mut SearchBar {
        &mut self.search_bar
    }

    pub fn get_kind_filter_mut(&mut self) -> &mut KindFilter {
        &mut self.kind_filter
    }

    pub fn get_result_list_mut(&mut self) -> &mut ResultList {
        &mut self.result_list
    }
}
