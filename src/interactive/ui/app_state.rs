use crate::interactive::application::QueryState;
use crate::interactive::constants::*;
use crate::interactive::domain::models::{
    DASHBOARD_SECTIONS, Focus, OverlayView, SearchKey, SearchRequest,
};
use crate::interactive::ui::commands::Command;
use crate::interactive::ui::events::Message;
use crate::schemas::{GlobalSearchFilters, SearchResult, SearchResultKind};
use std::time::{Duration, Instant};
use tracing::info;

/// Badge positions: 0 is "All", then one per kind in priority order.
pub const BADGE_COUNT: usize = SearchResultKind::ALL.len() + 1;

pub struct AppState {
    pub focus: Focus,
    pub overlay: OverlayState,
    pub search: QueryState,
    pub shell: ShellState,
    pub debounce_ms: u64,
}

pub struct OverlayState {
    pub open: bool,
    /// What is typed. Shared by the trigger and the overlay input.
    pub query: String,
    /// What was last searched for.
    pub debounced_query: String,
    pub filters: GlobalSearchFilters,
    pub selected_index: usize,
    pub badge_cursor: usize,
}

pub struct ShellState {
    pub location: String,
    pub message: Option<String>,
    pub sidebar_collapsed: bool,
    pub selected_section: usize,
    pub user_label: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE_MS, false)
    }
}

impl AppState {
    pub fn new(debounce_ms: u64, sidebar_collapsed: bool) -> Self {
        Self {
            focus: Focus::Trigger,
            overlay: OverlayState {
                open: false,
                query: String::new(),
                debounced_query: String::new(),
                filters: GlobalSearchFilters::default(),
                selected_index: 0,
                badge_cursor: 0,
            },
            search: QueryState::new(
                Duration::from_secs(SEARCH_STALE_TIME_SECS),
                SEARCH_CACHE_CAPACITY,
            ),
            shell: ShellState {
                location: DASHBOARD_SECTIONS[0].1.to_string(),
                message: None,
                sidebar_collapsed,
                selected_section: 0,
                user_label: None,
            },
            debounce_ms,
        }
    }

    pub fn with_user_label(mut self, label: Option<String>) -> Self {
        self.shell.user_label = label;
        self
    }

    pub fn update(&mut self, msg: Message) -> Command {
        self.update_at(msg, Instant::now())
    }

    /// Same as `update` with an explicit clock, so cache freshness can be
    /// driven from tests.
    pub fn update_at(&mut self, msg: Message, now: Instant) -> Command {
        match msg {
            Message::OpenOverlay => {
                self.focus = Focus::Overlay;
                if self.overlay.open {
                    return Command::None;
                }
                self.overlay.open = true;
                self.overlay.selected_index = 0;
                // Text still waiting on the debounce is searched right away.
                let flush = if self.overlay.query != self.overlay.debounced_query {
                    self.overlay.debounced_query = self.overlay.query.clone();
                    Command::CancelScheduledSearch
                } else {
                    Command::None
                };
                let key = self.current_key();
                flush.and(execute(self.search.enable(key, now)))
            }
            Message::CloseOverlay | Message::BackdropClicked => {
                self.close();
                Command::None
            }
            Message::QueryChanged(q) => {
                self.overlay.query = q;
                Command::ScheduleSearch(self.debounce_ms)
            }
            Message::DebounceElapsed(q) => {
                if q == self.overlay.debounced_query {
                    return Command::None;
                }
                self.overlay.debounced_query = q;
                self.overlay.selected_index = 0;
                self.refresh_key(now)
            }
            Message::SearchCompleted(response) => {
                self.search.complete(response, now);
                Command::None
            }
            Message::Retry => execute(self.search.refetch(now)),
            Message::SelectNext => {
                if self.overlay.selected_index + 1 < self.results().len() {
                    self.overlay.selected_index += 1;
                }
                Command::None
            }
            Message::SelectPrevious => {
                self.overlay.selected_index = self.overlay.selected_index.saturating_sub(1);
                Command::None
            }
            Message::HoverResult(index) => {
                if index < self.results().len() {
                    self.overlay.selected_index = index;
                }
                Command::None
            }
            Message::ActivateSelected => {
                if self.view() == OverlayView::Error {
                    return self.update_at(Message::Retry, now);
                }
                self.activate(self.overlay.selected_index)
            }
            Message::ActivateResult(index) => self.activate(index),
            Message::ToggleKind(kind) => {
                self.overlay.filters.toggle(kind);
                self.overlay.selected_index = 0;
                self.refresh_key(now)
            }
            Message::ClearKinds => {
                self.overlay.filters.clear();
                self.overlay.selected_index = 0;
                self.refresh_key(now)
            }
            Message::BadgeCursorNext => {
                self.overlay.badge_cursor = (self.overlay.badge_cursor + 1) % BADGE_COUNT;
                Command::None
            }
            Message::BadgeCursorPrevious => {
                self.overlay.badge_cursor =
                    (self.overlay.badge_cursor + BADGE_COUNT - 1) % BADGE_COUNT;
                Command::None
            }
            Message::ToggleBadgeAtCursor => match self.overlay.badge_cursor {
                0 => self.update_at(Message::ClearKinds, now),
                n => match SearchResultKind::ALL.get(n - 1) {
                    Some(&kind) => self.update_at(Message::ToggleKind(kind), now),
                    None => Command::None,
                },
            },
            Message::ToggleSidebar => {
                self.shell.sidebar_collapsed = !self.shell.sidebar_collapsed;
                Command::SaveSidebarCollapsed(self.shell.sidebar_collapsed)
            }
            Message::SectionUp => {
                self.shell.selected_section = self.shell.selected_section.saturating_sub(1);
                Command::None
            }
            Message::SectionDown => {
                if self.shell.selected_section + 1 < DASHBOARD_SECTIONS.len() {
                    self.shell.selected_section += 1;
                }
                Command::None
            }
            Message::OpenSection(index) => match DASHBOARD_SECTIONS.get(index) {
                Some(&(_, href)) => {
                    self.shell.selected_section = index;
                    self.navigate(href)
                }
                None => Command::None,
            },
            Message::SetStatus(msg) => {
                self.shell.message = Some(msg);
                Command::ScheduleClearMessage(MESSAGE_CLEAR_DELAY_MS)
            }
            Message::ClearMessage => {
                self.shell.message = None;
                Command::None
            }
        }
    }

    /// Overlay state as the renderer should show it.
    pub fn view(&self) -> OverlayView {
        if !self.overlay.open {
            OverlayView::Closed
        } else if self.search.is_error() {
            OverlayView::Error
        } else if self.search.is_loading() {
            OverlayView::Loading
        } else if self.results().is_empty() {
            OverlayView::Empty
        } else {
            OverlayView::Results
        }
    }

    /// Ranked results currently on display.
    pub fn results(&self) -> &[SearchResult] {
        self.search.results()
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results().get(self.overlay.selected_index)
    }

    fn current_key(&self) -> SearchKey {
        SearchKey::new(&self.overlay.debounced_query, &self.overlay.filters)
    }

    fn refresh_key(&mut self, now: Instant) -> Command {
        let key = self.current_key();
        execute(self.search.set_key(key, now))
    }

    fn close(&mut self) {
        self.overlay.open = false;
        self.focus = Focus::Trigger;
        self.search.disable();
    }

    fn activate(&mut self, index: usize) -> Command {
        let Some(href) = self.results().get(index).map(|r| r.href.clone()) else {
            return Command::None;
        };
        self.close();
        self.overlay.query.clear();
        self.navigate(&href)
            .and(Command::ScheduleSearch(self.debounce_ms))
    }

    fn navigate(&mut self, href: &str) -> Command {
        info!(href, "navigating");
        self.shell.location = href.to_string();
        if let Some(section) = DASHBOARD_SECTIONS
            .iter()
            .rposition(|(_, prefix)| href.starts_with(prefix))
        {
            self.shell.selected_section = section;
        }
        self.shell.message = Some(format!("Opened {href}"));
        Command::ScheduleClearMessage(MESSAGE_CLEAR_DELAY_MS)
    }
}

fn execute(request: Option<SearchRequest>) -> Command {
    request.map(Command::ExecuteSearch).unwrap_or(Command::None)
}
