use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::settings_io::{discover_root, load_board};
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::model::board::Board;
use crate::model::progress::{Granularity, Trend};
use crate::model::task::{Direction, HOLDING_TANK, Task};
use crate::ops::dashboard::{BucketGroup, Dashboard};

use super::input;
use super::render;
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Today's list, one column per bucket
    Today,
    /// Bar chart of today's completion
    Progress,
    /// Line chart of completion history
    Trends,
}

impl View {
    pub const ALL: [View; 3] = [View::Today, View::Progress, View::Trends];

    pub fn label(self) -> &'static str {
        match self {
            View::Today => "today",
            View::Progress => "progress",
            View::Trends => "trends",
        }
    }

    fn from_label(s: &str) -> Option<View> {
        View::ALL.into_iter().find(|v| v.label() == s)
    }

    pub fn next(self) -> View {
        match self {
            View::Today => View::Progress,
            View::Progress => View::Trends,
            View::Trends => View::Today,
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task name
    Add,
}

/// State of the add-task prompt
#[derive(Debug, Clone, Default)]
pub struct AddPrompt {
    pub buffer: String,
    /// Byte offset of the cursor in `buffer`
    pub cursor: usize,
    /// Index into the configured buckets
    pub bucket: usize,
}

/// Main application state.
///
/// `tasks` is a snapshot of today's list, re-read after every edit; the
/// files on disk stay the source of truth.
pub struct App {
    pub board: Board,
    pub dashboard: Dashboard,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub tasks: Vec<Task>,
    /// Column the cursor is in (configured buckets, then the Holding Tank)
    pub cursor_bucket: usize,
    /// Row within that column
    pub cursor_pos: usize,
    pub granularity: Granularity,
    /// Cached history for the Trends view
    pub trend: Option<Trend>,
    pub quote: Option<String>,
    pub add: AddPrompt,
    /// Help overlay visible
    pub show_help: bool,
    /// Last error or notice, shown in the status row
    pub message: Option<String>,
}

impl App {
    pub fn new(board: Board, today: NaiveDate) -> Self {
        let dashboard = Dashboard::open(&board, today);
        let theme = Theme::from_config(&board.config.ui, &board.settings.buckets);
        let quote = dashboard
            .quote(&mut rand::thread_rng())
            .map(str::to_string);
        let granularity = board.config.ui.default_granularity;

        let mut app = App {
            board,
            dashboard,
            view: View::Today,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            tasks: Vec::new(),
            cursor_bucket: 0,
            cursor_pos: 0,
            granularity,
            trend: None,
            quote,
            add: AddPrompt::default(),
            show_help: false,
            message: None,
        };
        app.reload();
        app
    }

    /// Bucket columns in display order
    pub fn columns(&self) -> Vec<BucketGroup> {
        self.dashboard.bucket_groups(&self.tasks)
    }

    pub fn column_count(&self) -> usize {
        self.board.settings.buckets.len() + 1
    }

    /// Bucket name of column `idx`
    pub fn column_bucket(&self, idx: usize) -> &str {
        self.board
            .settings
            .buckets
            .get(idx)
            .map_or(HOLDING_TANK, String::as_str)
    }

    fn column_len(&self, idx: usize) -> usize {
        let bucket = self.column_bucket(idx);
        self.tasks.iter().filter(|t| t.bucket == bucket).count()
    }

    /// The task under the cursor, as (bucket, position)
    pub fn selected(&self) -> Option<(String, usize)> {
        if self.cursor_pos < self.column_len(self.cursor_bucket) {
            Some((
                self.column_bucket(self.cursor_bucket).to_string(),
                self.cursor_pos,
            ))
        } else {
            None
        }
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor_bucket = self.cursor_bucket.min(self.column_count() - 1);
        let len = self.column_len(self.cursor_bucket);
        self.cursor_pos = self.cursor_pos.min(len.saturating_sub(1));
    }

    /// Re-read today's list (and the trend, if one is showing)
    pub fn reload(&mut self) {
        match self.dashboard.today_tasks() {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => self.report(e),
        }
        self.clamp_cursor();
        if self.trend.is_some() || self.view == View::Trends {
            self.reload_trend();
        }
    }

    pub fn reload_trend(&mut self) {
        match self.dashboard.trend(self.granularity) {
            Ok(trend) => self.trend = Some(trend),
            Err(e) => {
                self.trend = None;
                self.report(e);
            }
        }
    }

    /// Switch to a new day when the clock has passed midnight
    pub fn roll_over(&mut self, today: NaiveDate) {
        if today != self.dashboard.today() {
            tracing::info!(%today, "date changed");
            self.dashboard = Dashboard::open(&self.board, today);
            self.reload();
        }
    }

    fn report(&mut self, err: impl std::fmt::Display) {
        tracing::error!(error = %err, "dashboard request failed");
        self.message = Some(err.to_string());
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    pub fn set_view(&mut self, view: View) {
        self.view = view;
        if view == View::Trends {
            self.reload_trend();
        }
    }

    pub fn cycle_granularity(&mut self) {
        self.granularity = self.granularity.next();
        self.reload_trend();
    }

    pub fn toggle_selected(&mut self) {
        let Some((bucket, pos)) = self.selected() else {
            return;
        };
        if let Err(e) = self.dashboard.toggle(&bucket, pos) {
            self.report(e);
        }
        self.reload();
    }

    /// Move the selected task within its bucket; the cursor follows it
    pub fn move_selected(&mut self, direction: Direction) {
        let Some((bucket, pos)) = self.selected() else {
            return;
        };
        match self.dashboard.reorder(&bucket, pos, direction) {
            Ok(true) => {
                self.cursor_pos = match direction {
                    Direction::Up => pos - 1,
                    Direction::Down => pos + 1,
                };
            }
            Ok(false) => {}
            Err(e) => self.report(e),
        }
        self.reload();
    }

    pub fn begin_add(&mut self) {
        if self.board.settings.buckets.is_empty() {
            self.message = Some("no buckets configured in settings.json".into());
            return;
        }
        // Default to the column under the cursor; the Holding Tank is not a target
        let bucket = self.cursor_bucket.min(self.board.settings.buckets.len() - 1);
        self.add = AddPrompt {
            bucket,
            ..AddPrompt::default()
        };
        self.mode = Mode::Add;
    }

    pub fn cancel_add(&mut self) {
        self.add = AddPrompt::default();
        self.mode = Mode::Navigate;
    }

    pub fn submit_add(&mut self) {
        let bucket = self.column_bucket(self.add.bucket).to_string();
        let name = std::mem::take(&mut self.add.buffer);
        self.mode = Mode::Navigate;
        match self.dashboard.add_task(&name, &bucket) {
            Ok(true) => {
                self.reload();
                self.cursor_bucket = self.add.bucket;
                self.cursor_pos = self.column_len(self.cursor_bucket).saturating_sub(1);
            }
            Ok(false) => {}
            Err(e) => self.report(e),
        }
        self.add = AddPrompt::default();
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    let Some(ui_state) = read_ui_state(&app.board.root) else {
        return;
    };

    if let Some(view) = View::from_label(&ui_state.view) {
        app.set_view(view);
    }
    if let Some(g) = ui_state.granularity
        && g != app.granularity
    {
        app.granularity = g;
        if app.view == View::Trends {
            app.reload_trend();
        }
    }
    if let Some(bucket) = &ui_state.cursor_bucket
        && let Some(idx) = (0..app.column_count()).find(|i| app.column_bucket(*i) == bucket)
    {
        app.cursor_bucket = idx;
        app.cursor_pos = ui_state.cursor_position;
    }
    app.clamp_cursor();
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    let ui_state = UiState {
        view: app.view.label().to_string(),
        cursor_bucket: Some(app.column_bucket(app.cursor_bucket).to_string()),
        cursor_position: app.cursor_pos,
        granularity: Some(app.granularity),
    };
    if let Err(e) = write_ui_state(&app.board.root, &ui_state) {
        tracing::warn!(error = %e, "could not save UI state");
    }
}

/// Run the TUI application
pub fn run(dashboard_dir: Option<&std::path::Path>) -> Result<(), Box<dyn std::error::Error>> {
    let start = match dashboard_dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let root = discover_root(&start)?;
    crate::logging::init_file(&root);
    let board = load_board(&root)?;

    let mut app = App::new(board, Local::now().date_naive());
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                input::handle_key(app, key);
                // Debounced state save: every ~5 key presses
                save_counter += 1;
                if save_counter >= 5 {
                    save_ui_state(app);
                    save_counter = 0;
                }
            }
        } else if app.mode == Mode::Navigate {
            app.roll_over(Local::now().date_naive());
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
