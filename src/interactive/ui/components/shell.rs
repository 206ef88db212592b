use crate::interactive::constants::{SIDEBAR_WIDTH, TRIGGER_BAR_HEIGHT};
use crate::interactive::domain::models::{DASHBOARD_SECTIONS, Focus};
use crate::interactive::ui::app_state::AppState;
use crate::interactive::ui::components::{Component, Styles, hit, is_exit_prompt};
use crate::interactive::ui::events::Message;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const TRIGGER_PLACEHOLDER: &str =
    "Search repos, issues, notes, events, transactions, agents…";

const COLLAPSED_SIDEBAR_WIDTH: u16 = 5;

/// The dashboard around the overlay: header with the search trigger,
/// sidebar of sections, the current page and a status line.
#[derive(Default)]
pub struct Shell {
    query: String,
    focused: bool,
    location: String,
    message: Option<String>,
    sidebar_collapsed: bool,
    selected_section: usize,
    user_label: Option<String>,
    trigger_area: Rect,
    section_areas: Vec<Rect>,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(&mut self, state: &AppState) {
        self.query = state.overlay.query.clone();
        self.focused = state.focus == Focus::Trigger && !state.overlay.open;
        self.location = state.shell.location.clone();
        self.message = state.shell.message.clone();
        self.sidebar_collapsed = state.shell.sidebar_collapsed;
        self.selected_section = state.shell.selected_section;
        self.user_label = state.shell.user_label.clone();
    }

    pub fn trigger_area(&self) -> Rect {
        self.trigger_area
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<Message> {
        if hit(self.trigger_area, column, row) {
            return Some(Message::OpenOverlay);
        }
        self.section_areas
            .iter()
            .position(|area| hit(*area, column, row))
            .map(Message::OpenSection)
    }

    fn render_header(&mut self, f: &mut Frame, area: Rect) {
        let user = self.user_label.clone().unwrap_or_else(|| "offline".to_string());
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(9),
                Constraint::Min(10),
                Constraint::Length(user.chars().count() as u16 + 2),
            ])
            .split(area);

        let brand = Paragraph::new(Span::styled("Atlas", Styles::title()))
            .block(Block::default().borders(Borders::TOP | Borders::BOTTOM | Borders::LEFT));
        f.render_widget(brand, chunks[0]);

        self.trigger_area = chunks[1];
        let text = if self.query.is_empty() {
            Span::styled(TRIGGER_PLACEHOLDER, Styles::dimmed())
        } else {
            Span::styled(self.query.clone(), Styles::normal())
        };
        let border = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Styles::dimmed()
        };
        let trigger = Paragraph::new(Line::from(vec![Span::raw("⌕ "), text])).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title_bottom(
                    Line::from(Span::styled(" Ctrl+K ", Styles::dimmed())).right_aligned(),
                ),
        );
        f.render_widget(trigger, chunks[1]);

        let user = Paragraph::new(Span::styled(user, Styles::label()))
            .block(Block::default().borders(Borders::TOP | Borders::BOTTOM | Borders::RIGHT));
        f.render_widget(user, chunks[2]);
    }

    fn render_sidebar(&mut self, f: &mut Frame, area: Rect) {
        self.section_areas.clear();
        let inner = Rect::new(
            area.x + 1,
            area.y + 1,
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        );

        let mut lines = Vec::with_capacity(DASHBOARD_SECTIONS.len());
        for (index, (label, _)) in DASHBOARD_SECTIONS.iter().enumerate() {
            if index as u16 >= inner.height {
                break;
            }
            let text = if self.sidebar_collapsed {
                label.chars().take(1).collect::<String>()
            } else {
                (*label).to_string()
            };
            let style = if index == self.selected_section {
                Styles::selected()
            } else {
                Styles::normal()
            };
            lines.push(Line::from(Span::styled(format!(" {text}"), style)));
            self.section_areas
                .push(Rect::new(inner.x, inner.y + index as u16, inner.width, 1));
        }

        let sidebar = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(sidebar, area);
    }

    fn render_page(&self, f: &mut Frame, area: Rect) {
        let title = DASHBOARD_SECTIONS
            .iter()
            .rev()
            .find(|(_, href)| self.location.starts_with(href))
            .map(|(label, _)| *label)
            .unwrap_or("Dashboard");

        let lines = vec![
            Line::from(Span::styled(title, Styles::title())),
            Line::from(Span::styled(self.location.clone(), Styles::dimmed())),
            Line::from(""),
            Line::from(Span::styled(
                "Press / or Ctrl+K to search across your workspace.",
                Styles::normal(),
            )),
        ];
        let page = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(page, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let status = match &self.message {
            Some(msg) if is_exit_prompt(&self.message) => {
                Paragraph::new(Span::styled(msg.clone(), Styles::error()))
            }
            Some(msg) => Paragraph::new(Span::styled(msg.clone(), Styles::label())),
            None => Paragraph::new(Span::styled(
                "/ or Ctrl+K: Search | ↑/↓: Sections | →: Open | Ctrl+B: Sidebar | Ctrl+C twice: Exit",
                Styles::dimmed(),
            )),
        };
        f.render_widget(status, area);
    }
}

impl Component for Shell {
    fn render(&mut self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TRIGGER_BAR_HEIGHT), // Header
                Constraint::Min(0),                     // Body
                Constraint::Length(1),                  // Status
            ])
            .split(area);

        self.render_header(f, rows[0]);

        let sidebar_width = if self.sidebar_collapsed {
            COLLAPSED_SIDEBAR_WIDTH
        } else {
            SIDEBAR_WIDTH
        };
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(rows[1]);

        self.render_sidebar(f, body[0]);
        self.render_page(f, body[1]);
        self.render_status(f, rows[2]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('b') => Some(Message::ToggleSidebar),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Char('/') | KeyCode::Enter => Some(Message::OpenOverlay),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::SectionUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::SectionDown),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('o') => {
                Some(Message::OpenSection(self.selected_section))
            }
            _ => None,
        }
    }
}
