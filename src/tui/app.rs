use crate::tui::debounce::Debouncer;
use crate::tui::handlers::{HelpAction, KeyHandler, ListAction, SearchAction};
use crate::tui::row::RowCache;
use crate::tui::search::{self, FilterMode, SearchState};
use crate::tui::selection::SelectionSet;
use crate::users::fetch::{FetchError, FetchHandle, UserSource};
use crate::users::models::Record;
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

// How often the event loop wakes up while a fetch is in flight.
const FETCH_POLL_INTERVAL: Duration = Duration::from_millis(50);
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAffordance {
    Hidden,
    Visible,
}

/// Owns every piece of view state: the base list fetched on mount, the
/// visible list derived from the query, and the checkbox selection.
pub struct App {
    pub base: Vec<Record>,
    pub visible: Vec<Record>,
    pub search: SearchState,
    pub selection: SelectionSet,
    pub load_state: LoadState,
    pub focus: Focus,
    pub cursor: usize,
    pub help_mode: bool,
    pub should_quit: bool,
    pub rows: RowCache,
    filter_mode: FilterMode,
    debouncer: Debouncer<String>,
    source: Option<Arc<dyn UserSource>>,
    fetch: Option<FetchHandle>,
    mounted: bool,
    filter_runs: usize,
}

impl App {
    pub fn new(filter_mode: FilterMode, debounce: Duration) -> Self {
        Self {
            base: Vec::new(),
            visible: Vec::new(),
            search: SearchState::new(),
            selection: SelectionSet::new(),
            load_state: LoadState::Loading,
            focus: Focus::Search,
            cursor: 0,
            help_mode: false,
            should_quit: false,
            rows: RowCache::new(),
            filter_mode,
            debouncer: Debouncer::new(debounce),
            source: None,
            fetch: None,
            mounted: false,
            filter_runs: 0,
        }
    }

    /// Issues the one fetch of the record collection.
    pub fn mount(&mut self, source: Arc<dyn UserSource>) {
        self.source = Some(source);
        self.mounted = true;
        self.start_fetch();
    }

    /// Cancels the pending filter and abandons any in-flight fetch.
    pub fn unmount(&mut self) {
        self.debouncer.cancel();
        self.fetch = None;
        self.mounted = false;
    }

    fn start_fetch(&mut self) {
        let Some(source) = self.source.clone() else {
            return;
        };

        info!(source = %source.describe(), "fetching users");
        self.load_state = LoadState::Loading;

        match FetchHandle::spawn(source) {
            Ok(handle) => self.fetch = Some(handle),
            Err(e) => self.on_fetch_complete(Err(e)),
        }
    }

    pub fn on_fetch_complete(&mut self, result: Result<Vec<Record>, FetchError>) {
        if !self.mounted {
            return;
        }

        match result {
            Ok(records) => {
                info!(count = records.len(), "users loaded");
                self.base = records;
                self.visible = search::filter(&self.base, &self.base, &self.search.query, self.filter_mode);
                self.selection = self.selection.clear();
                self.rows = RowCache::new();
                self.cursor = 0;
                self.load_state = LoadState::Loaded;
            }
            Err(e) => {
                warn!(error = %e, "failed to load users");
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Advances timers and collects background results.
    pub fn tick(&mut self, now: Instant) {
        if let Some(result) = self.fetch.as_ref().and_then(FetchHandle::poll) {
            self.fetch = None;
            self.on_fetch_complete(result);
        }

        if let Some(query) = self.debouncer.poll(now) {
            self.apply_filter(&query);
        }
    }

    /// How long the event loop may block before `tick` has work to do.
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        let idle = if self.fetch.is_some() {
            FETCH_POLL_INTERVAL
        } else {
            IDLE_POLL_INTERVAL
        };

        match self.debouncer.time_until_due(now) {
            Some(due) => due.min(idle),
            None => idle,
        }
    }

    /// Stores the raw query right away and schedules filtering on it.
    pub fn on_query_input(&mut self, raw: String, now: Instant) {
        self.search.set(raw.clone());
        self.debouncer.call(raw, now);
    }

    // Runs when the debounce window closes; reads base and visible as they
    // are now, not as they were when the keystroke happened.
    fn apply_filter(&mut self, query: &str) {
        self.visible = search::filter(&self.base, &self.visible, query, self.filter_mode);
        self.filter_runs += 1;
        self.clamp_cursor();

        debug!(
            run = self.filter_runs,
            query,
            visible = self.visible.len(),
            mode = %self.filter_mode,
            "filter applied"
        );
    }

    pub fn on_checkbox_toggle(&mut self, id: u64) {
        if !self.visible.iter().any(|record| record.id == id) {
            return;
        }

        self.selection = self.selection.toggle(id);
        debug!(id, selected = self.selection.len(), "selection toggled");
    }

    /// Permanently removes every selected record.
    pub fn on_delete_click(&mut self) {
        if self.selection.is_empty() {
            return;
        }

        let selection = self.selection.clone();
        let before = self.base.len();

        self.base.retain(|record| !selection.contains(record.id));
        self.visible.retain(|record| !selection.contains(record.id));
        self.rows.retain(|id| !selection.contains(id));
        self.selection = selection.clear();
        self.clamp_cursor();

        info!(removed = before - self.base.len(), remaining = self.base.len(), "users deleted");
    }

    pub fn delete_affordance(&self) -> DeleteAffordance {
        if self.selection.is_empty() {
            DeleteAffordance::Hidden
        } else {
            DeleteAffordance::Visible
        }
    }

    pub fn reload(&mut self) {
        if matches!(self.load_state, LoadState::Failed(_)) && self.mounted {
            self.start_fetch();
        }
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    /// True while a typed query is waiting for its debounce window to close.
    pub fn filter_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        self.handle_key_event_at(key_event, Instant::now())
    }

    pub fn handle_key_event_at(&mut self, key_event: KeyEvent, now: Instant) -> Result<()> {
        if self.help_mode {
            self.handle_help_key(key_event);
        } else {
            match self.focus {
                Focus::Search => self.handle_search_key(key_event, now),
                Focus::List => self.handle_list_key(key_event),
            }
        }
        Ok(())
    }

    fn handle_help_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_help_key(key_event) {
            HelpAction::ExitHelp => self.help_mode = false,
            HelpAction::None => {}
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent, now: Instant) {
        match KeyHandler::handle_search_key(key_event) {
            SearchAction::Quit => self.should_quit = true,
            SearchAction::FocusList => self.focus = Focus::List,
            SearchAction::Backspace => {
                if !self.search.query.is_empty() {
                    let raw = self.search.without_last_char();
                    self.on_query_input(raw, now);
                }
            }
            SearchAction::InsertChar(c) => {
                let raw = self.search.with_char(c);
                self.on_query_input(raw, now);
            }
            SearchAction::None => {}
        }
    }

    fn handle_list_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_list_key(key_event) {
            ListAction::Quit => self.should_quit = true,
            ListAction::MoveUp => self.move_cursor_up(),
            ListAction::MoveDown => self.move_cursor_down(),
            ListAction::ToggleCheckbox => {
                if let Some(id) = self.visible.get(self.cursor).map(|record| record.id) {
                    self.on_checkbox_toggle(id);
                }
            }
            ListAction::DeleteSelected => self.on_delete_click(),
            ListAction::FocusSearch => self.focus = Focus::Search,
            ListAction::Reload => self.reload(),
            ListAction::ToggleHelp => self.help_mode = true,
            ListAction::None => {}
        }
    }

    fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
    }
}
