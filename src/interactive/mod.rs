use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, poll,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::search::SearchService;
use crate::session::Preferences;

pub mod application;
pub mod constants;
pub mod debounce;
pub mod domain;
pub mod ui;


use self::constants::*;
use self::debounce::Debouncer;
use self::domain::models::{SearchRequest, SearchResponse};
use self::ui::{
    app_state::AppState, commands::Command, components::Component, events::Message,
    renderer::Renderer,
};

/// The dashboard shell with the global search overlay.
pub struct InteractiveSearch {
    state: AppState,
    renderer: Renderer,
    search_service: Arc<SearchService>,
    preferences: Preferences,
    search_sender: Option<Sender<SearchRequest>>,
    search_receiver: Option<Receiver<SearchResponse>>,
    debouncer: Debouncer<String>,
    last_ctrl_c_press: Option<Instant>,
    message_timer: Option<Instant>,
    message_clear_delay: u64,
}

impl InteractiveSearch {
    pub fn new(
        search_service: SearchService,
        preferences: Preferences,
        debounce_ms: u64,
        user_label: Option<String>,
    ) -> Self {
        let state = AppState::new(debounce_ms, preferences.sidebar_collapsed())
            .with_user_label(user_label);

        Self {
            state,
            renderer: Renderer::new(),
            search_service: Arc::new(search_service),
            preferences,
            search_sender: None,
            search_receiver: None,
            debouncer: Debouncer::new(),
            last_ctrl_c_press: None,
            message_timer: None,
            message_clear_delay: MESSAGE_CLEAR_DELAY_MS,
        }
    }

    /// Runs until the user quits. A non-empty `query` opens the overlay
    /// with it already typed.
    pub fn run(&mut self, query: &str) -> Result<()> {
        let mut terminal = self.setup_terminal()?;
        self.connect_worker();

        if !query.is_empty() {
            self.handle_message(Message::QueryChanged(query.to_string()));
            self.handle_message(Message::OpenOverlay);
        }

        let result = self.run_app(&mut terminal);

        self.cleanup_terminal(&mut terminal)?;
        result
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn cleanup_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                self.renderer.render(f, &self.state);
            })?;

            if poll(Duration::from_millis(EVENT_POLL_INTERVAL_MS))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_input(key) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let Some(msg) = self.renderer.handle_mouse(mouse, &self.state) {
                            self.handle_message(msg);
                        }
                    }
                    _ => {}
                }
            }

            self.drain_responses();
            self.poll_timers(Instant::now());
        }
        Ok(())
    }

    /// Handles one key press. Returns true when the app should exit.
    pub(crate) fn handle_input(&mut self, key: KeyEvent) -> bool {
        // Global Ctrl+C handling for exit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if let Some(last_press) = self.last_ctrl_c_press
                && last_press.elapsed() < Duration::from_secs(DOUBLE_CTRL_C_TIMEOUT_SECS)
            {
                return true;
            }
            self.last_ctrl_c_press = Some(Instant::now());
            self.state.shell.message = Some(EXIT_PROMPT.to_string());
            self.execute_command(Command::ScheduleClearMessage(MESSAGE_CLEAR_DELAY_MS));
            return false;
        }

        let message = if self.state.overlay.open {
            self.handle_overlay_input(key)
        } else {
            match key.code {
                KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Message::OpenOverlay)
                }
                KeyCode::Char('q') if key.modifiers.is_empty() => return true,
                _ => self.renderer.get_shell_mut().handle_key(key),
            }
        };

        if let Some(msg) = message {
            self.handle_message(msg);
        }
        false
    }

    fn handle_overlay_input(&mut self, key: KeyEvent) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => Some(Message::CloseOverlay),
            KeyCode::Char('r') if ctrl => Some(Message::Retry),
            KeyCode::Up | KeyCode::Down | KeyCode::Enter => {
                self.renderer.get_result_list_mut().handle_key(key)
            }
            KeyCode::Char('p') | KeyCode::Char('n') if ctrl => {
                self.renderer.get_result_list_mut().handle_key(key)
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Null => {
                self.renderer.get_kind_filter_mut().handle_key(key)
            }
            KeyCode::Char(' ') if ctrl => self.renderer.get_kind_filter_mut().handle_key(key),
            KeyCode::Char(c) if alt && c.is_ascii_digit() => {
                self.renderer.get_kind_filter_mut().handle_key(key)
            }
            _ => self.renderer.get_search_bar_mut().handle_key(key),
        }
    }

    fn handle_message(&mut self, message: Message) {
        let command = self.state.update(message);
        self.execute_command(command);
    }

    fn execute_command(&mut self, command: Command) {
        match command {
            Command::None => {}
            Command::ScheduleSearch(delay) => {
                self.debouncer.schedule(
                    self.state.overlay.query.clone(),
                    Duration::from_millis(delay),
                    Instant::now(),
                );
            }
            Command::CancelScheduledSearch => self.debouncer.cancel(),
            Command::ExecuteSearch(request) => self.execute_search(request),
            Command::SaveSidebarCollapsed(collapsed) => {
                self.preferences.set_sidebar_collapsed(collapsed);
            }
            Command::ScheduleClearMessage(delay) => {
                self.message_timer = Some(Instant::now());
                self.message_clear_delay = delay;
            }
            Command::Batch(commands) => {
                for command in commands {
                    self.execute_command(command);
                }
            }
        }
    }

    fn execute_search(&mut self, request: SearchRequest) {
        debug!(id = request.id, query = %request.key.query, "issuing search");
        if let Some(sender) = &self.search_sender
            && sender.send(request).is_err()
        {
            warn!("search worker has stopped");
        }
    }

    fn drain_responses(&mut self) {
        let responses: Vec<SearchResponse> = match &self.search_receiver {
            Some(receiver) => receiver.try_iter().collect(),
            None => return,
        };
        for response in responses {
            self.handle_message(Message::SearchCompleted(response));
        }
    }

    /// Fires the debounce and message timers that are due at `now`.
    pub(crate) fn poll_timers(&mut self, now: Instant) {
        if let Some(query) = self.debouncer.poll(now) {
            self.handle_message(Message::DebounceElapsed(query));
        }

        if let Some(timer) = self.message_timer
            && now.duration_since(timer) >= Duration::from_millis(self.message_clear_delay)
        {
            self.message_timer = None;
            self.handle_message(Message::ClearMessage);
        }
    }

    fn connect_worker(&mut self) {
        let (tx, rx) = self.start_search_worker();
        self.search_sender = Some(tx);
        self.search_receiver = Some(rx);
    }

    fn start_search_worker(&self) -> (Sender<SearchRequest>, Receiver<SearchResponse>) {
        let (request_tx, request_rx) = mpsc::channel::<SearchRequest>();
        let (response_tx, response_rx) = mpsc::channel::<SearchResponse>();
        let search_service = self.search_service.clone();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let outcome = search_service
                    .search(&request.key.query, &request.key.filters())
                    .map_err(|e| format!("{e:#}"));
                if let Err(e) = &outcome {
                    warn!(id = request.id, error = %e, "search failed");
                }
                let response = SearchResponse {
                    id: request.id,
                    key: request.key,
                    outcome,
                };
                if response_tx.send(response).is_err() {
                    break;
                }
            }
        });

        (request_tx, response_rx)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Blocks until the worker answers, then applies the answer.
    #[cfg(test)]
    pub(crate) fn wait_for_search(&mut self, timeout: Duration) -> bool {
        let response = match &self.search_receiver {
            Some(receiver) => receiver.recv_timeout(timeout),
            None => return false,
        };
        match response {
            Ok(response) => {
                self.handle_message(Message::SearchCompleted(response));
                true
            }
            Err(_) => false,
        }
    }
}
