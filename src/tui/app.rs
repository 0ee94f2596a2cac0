use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use regex::Regex;

use crate::io::state::{PersistedState, read_state, write_state};
use crate::model::config::Config;
use crate::model::task::Task;
use crate::model::view::ViewState;
use crate::ops::edit::EditSession;
use crate::ops::filter;
use crate::ops::selection::Selection;
use crate::ops::store::TaskStore;
use crate::util::unicode;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode. Text-entry modes (`Search`, `Field`, `Comment`)
/// swallow every printable key, so shortcuts never fire while typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the list
    Navigate,
    /// Typing a search query
    Search,
    /// Edit dialog open, no field being typed into
    Dialog,
    /// Typing into one of the dialog's text fields
    Field,
    /// Status changed: typing the mandatory comment
    Comment,
}

/// Fields of the edit dialog, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogField {
    Name,
    Labels,
    Status,
    Priority,
    Assignee,
    DueDate,
}

impl DialogField {
    pub const ALL: [DialogField; 6] = [
        DialogField::Name,
        DialogField::Labels,
        DialogField::Status,
        DialogField::Priority,
        DialogField::Assignee,
        DialogField::DueDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DialogField::Name => "Task Name",
            DialogField::Labels => "Labels",
            DialogField::Status => "Status",
            DialogField::Priority => "Priority",
            DialogField::Assignee => "Assignee",
            DialogField::DueDate => "Due Date",
        }
    }

    /// Status and priority are picked from a list; the rest are typed
    pub fn is_text(self) -> bool {
        !matches!(self, DialogField::Status | DialogField::Priority)
    }

    pub fn next(self) -> DialogField {
        let idx = DialogField::ALL.iter().position(|f| *f == self).unwrap_or(0);
        DialogField::ALL[(idx + 1) % DialogField::ALL.len()]
    }

    pub fn prev(self) -> DialogField {
        let idx = DialogField::ALL.iter().position(|f| *f == self).unwrap_or(0);
        DialogField::ALL[(idx + DialogField::ALL.len() - 1) % DialogField::ALL.len()]
    }
}

/// Single-line text buffer with a grapheme-aware cursor (byte offset)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub buffer: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new(text: &str) -> Self {
        TextInput {
            buffer: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }
}

/// The open edit dialog
#[derive(Debug, Clone)]
pub struct Dialog {
    pub session: EditSession,
    /// Field with focus inside the dialog
    pub field: DialogField,
    /// Buffer for the field being typed into (Field mode) or the comment (Comment mode)
    pub input: TextInput,
}

impl Dialog {
    pub fn open(task: &Task) -> Self {
        Dialog {
            session: EditSession::open(task),
            field: DialogField::Name,
            input: TextInput::default(),
        }
    }
}

/// A `load_more` in flight: the next page lands at `deadline`
#[derive(Debug, Clone, Copy)]
pub struct PendingLoad {
    pub deadline: Instant,
}

/// Main application state. Constructed explicitly and passed to every
/// input handler and renderer.
pub struct App {
    pub store: TaskStore,
    pub view: ViewState,
    pub selection: Selection,
    pub dialog: Option<Dialog>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_help: bool,
    pub show_key_hints: bool,
    /// Search text being typed (mirrors `view.search_query` live)
    pub search_input: TextInput,
    /// First visible row of the task table
    pub scroll_offset: usize,
    /// Set when focus moves to a new row: the renderer centers it once
    pub scroll_to_focus: bool,
    /// Where the table rows were last drawn (for mouse hit-testing)
    pub rows_area: Option<Rect>,
    pub pending_load: Option<PendingLoad>,
    pub load_latency: Duration,
    /// Transient message shown in the status row
    pub status_message: Option<String>,
    pub status_is_error: bool,
    /// Where view state is persisted (None disables persistence)
    pub state_dir: Option<PathBuf>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            store: TaskStore::new(config.store.page_size),
            view: ViewState::default(),
            selection: Selection::default(),
            dialog: None,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_help: false,
            show_key_hints: config.ui.show_key_hints,
            search_input: TextInput::default(),
            scroll_offset: 0,
            scroll_to_focus: false,
            rows_area: None,
            pending_load: None,
            load_latency: Duration::from_millis(config.store.load_latency_ms),
            status_message: None,
            status_is_error: false,
            state_dir: None,
        }
    }

    /// Replace the task collection. Focus and scroll start over.
    pub fn load_tasks(&mut self, tasks: Vec<Task>) {
        self.store.load(tasks);
        self.pending_load = None;
        self.reset_list_position();
    }

    /// The list shown for the current tab, derived fresh on every call
    pub fn filtered(&self) -> Vec<&Task> {
        filter::derive_view(self.store.visible(), &self.view)
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered().len()
    }

    /// Task under the focused row
    pub fn focused_task(&self) -> Option<&Task> {
        let idx = self.selection.focused()?;
        self.filtered().get(idx).copied()
    }

    /// The filtered list changed identity: drop focus and scroll back to the top
    pub fn reset_list_position(&mut self) {
        self.selection.clear();
        self.scroll_offset = 0;
        self.scroll_to_focus = false;
    }

    /// Drop focus if the list no longer holds the focused row
    pub fn reconcile_selection(&mut self) {
        let len = self.filtered_len();
        self.selection.reconcile(len);
        if len == 0 {
            self.scroll_offset = 0;
        }
    }

    /// Ask the store for the next page. Ignored while a load is in flight
    /// or when everything is already paged in.
    pub fn request_load_more(&mut self, now: Instant) {
        if self.store.begin_load_more() {
            tracing::debug!(page = self.store.current_page() + 1, "load more requested");
            self.pending_load = Some(PendingLoad {
                deadline: now + self.load_latency,
            });
        }
    }

    /// Advance timers: lands a pending page once its deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(pending) = self.pending_load
            && now >= pending.deadline
        {
            self.pending_load = None;
            let anchor = self
                .dialog
                .as_ref()
                .map(|d| d.session.task_id())
                .or_else(|| self.focused_task().map(|t| t.id));
            self.store.complete_load_more();
            match anchor {
                Some(id) => {
                    if !self.refocus_task(id) {
                        self.selection.clear();
                    }
                }
                None => self.reconcile_selection(),
            }
        }
    }

    /// Move focus to wherever task `id` sits in the rebuilt list, shifting the
    /// scroll by the same amount so the row stays put on screen. Returns false
    /// when the task is no longer listed.
    pub fn refocus_task(&mut self, id: u64) -> bool {
        let tasks = self.filtered();
        let len = tasks.len();
        let Some(index) = tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        if let Some(old) = self.selection.focused() {
            self.scroll_offset = (self.scroll_offset + index).saturating_sub(old);
        }
        self.selection.focus(index, len);
        true
    }

    /// Search-hit highlighter for task names
    pub fn search_re(&self) -> Option<Regex> {
        if self.view.search_query.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(&self.view.search_query))).ok()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = true;
    }

    /// Write view state (and the paged-in tasks) to the state file
    pub fn persist(&self) {
        let Some(dir) = &self.state_dir else {
            return;
        };
        let state = PersistedState::capture(&self.view, self.store.visible());
        if let Err(e) = write_state(dir, &state) {
            tracing::warn!(dir = %dir.display(), error = %e, "could not save state");
        }
    }
}

/// What to start the dashboard with
pub struct RunOptions {
    pub config: Config,
    /// Freshly fetched tasks; None starts from the cached tasks
    pub tasks: Option<Vec<Task>>,
}

/// Restore view state from the state file, and return the cached tasks
pub fn restore_state(app: &mut App) -> Vec<Task> {
    let Some(dir) = &app.state_dir else {
        return Vec::new();
    };
    let Some(state) = read_state(dir) else {
        return Vec::new();
    };
    match state.view_state() {
        Some(view) => {
            app.search_input = TextInput::new(&view.search_query);
            app.view = view;
        }
        None => tracing::debug!("persisted view state unusable, using defaults"),
    }
    state.tasks
}

/// Run the TUI application
pub fn run(opts: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let RunOptions { config, tasks } = opts;
    let mut app = App::new(&config);
    app.state_dir = Some(config.state_dir());

    let cached = restore_state(&mut app);
    app.load_tasks(tasks.unwrap_or(cached));
    tracing::info!(
        tasks = app.store.all().len(),
        tab = app.view.tab.as_str(),
        "dashboard starting"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    app.persist();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key, Instant::now(), Utc::now());
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        input::handle_click(app, mouse.column, mouse.row, Instant::now());
                    }
                    MouseEventKind::ScrollDown => {
                        input::handle_scroll(app, 3, Instant::now());
                    }
                    MouseEventKind::ScrollUp => {
                        input::handle_scroll(app, -3, Instant::now());
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use crate::model::view::Tab;
    use tempfile::TempDir;

    #[test]
    fn text_input_editing() {
        let mut input = TextInput::new("héllo");
        assert_eq!(input.cursor, "héllo".len());
        input.backspace();
        assert_eq!(input.buffer, "héll");
        input.home();
        input.right();
        input.right();
        input.delete();
        assert_eq!(input.buffer, "hél");
        input.insert('!');
        assert_eq!(input.buffer, "hé!l");
        input.end();
        input.insert('x');
        assert_eq!(input.buffer, "hé!lx");
        input.clear();
        assert_eq!(input, TextInput::default());
    }

    #[test]
    fn dialog_field_cycle() {
        assert_eq!(DialogField::Name.next(), DialogField::Labels);
        assert_eq!(DialogField::DueDate.next(), DialogField::Name);
        assert_eq!(DialogField::Name.prev(), DialogField::DueDate);
        assert!(!DialogField::Status.is_text());
        assert!(DialogField::Assignee.is_text());
    }

    #[test]
    fn pending_load_lands_after_deadline() {
        let mut app = app_with_tasks(generated_tasks(100));
        app.load_latency = Duration::from_millis(1000);
        let start = Instant::now();
        app.request_load_more(start);
        assert!(app.store.is_loading());
        // A second request while loading is ignored
        app.request_load_more(start + Duration::from_millis(10));

        app.tick(start + Duration::from_millis(500));
        assert_eq!(app.store.visible().len(), 30);
        app.tick(start + Duration::from_millis(1000));
        assert_eq!(app.store.visible().len(), 60);
        assert!(app.pending_load.is_none());
        app.tick(start + Duration::from_millis(5000));
        assert_eq!(app.store.visible().len(), 60);
    }

    #[test]
    fn load_tasks_resets_focus() {
        let mut app = app_with_tasks(generated_tasks(10));
        app.selection.down(app.filtered_len());
        app.load_tasks(generated_tasks(5));
        assert_eq!(app.selection.focused(), None);
    }

    #[test]
    fn persist_and_restore_view() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_tasks(generated_tasks(10));
        app.state_dir = Some(dir.path().to_path_buf());
        app.view.tab = Tab::Closed;
        app.view.search_query = "Task 1".into();
        app.persist();

        let mut fresh = app_with_tasks(Vec::new());
        fresh.state_dir = Some(dir.path().to_path_buf());
        let cached = restore_state(&mut fresh);
        assert_eq!(fresh.view.tab, Tab::Closed);
        assert_eq!(fresh.search_input.buffer, "Task 1");
        assert_eq!(cached.len(), 10);
    }

    #[test]
    fn restore_without_state_dir_is_empty() {
        let mut app = app_with_tasks(Vec::new());
        assert!(restore_state(&mut app).is_empty());
        assert_eq!(app.view, ViewState::default());
    }

    #[test]
    fn search_regex_escapes_query() {
        let mut app = app_with_tasks(Vec::new());
        assert!(app.search_re().is_none());
        app.view.search_query = "a.b(".into();
        let re = app.search_re().unwrap();
        assert!(re.is_match("A.B("));
        assert!(!re.is_match("axb("));
    }
}
