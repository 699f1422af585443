pub mod app_dirs;
pub mod ledger;
pub mod report;
pub mod rollover;
pub mod runtime;
pub mod session_log;
pub mod store;
pub mod tracker;
pub mod ui;
pub mod util;

use crate::{
    ledger::Ledger,
    rollover::{RolloverMonitor, ROLLOVER_PERIOD},
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session_log::SessionLog,
    store::{FileStateStore, StateStore},
    tracker::Tracker,
};
use chrono::{Local, NaiveDate};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{debug, error};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

/// Display refresh cadence for the running stopwatch
const TICK_RATE_MS: u64 = 1000;

/// stopwatch productivity tui with coin rewards and daily hour charts
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A stopwatch productivity TUI: track work sessions, earn one coin per 15 minutes of tracked time, and review your history and daily hours chart. State lives in a single JSON document."
)]
pub struct Cli {
    /// location of the persisted state document
    #[clap(long, value_name = "PATH", default_value = store::DEFAULT_DATA_FILE)]
    data_file: PathBuf,
}

/// Which view is on screen
#[derive(Debug, Clone, Copy, PartialEq, strum_macros::Display)]
pub enum Screen {
    Timer,
    Sessions,
    Graph,
    ConfirmReset,
}

/// Commands the presentation layer dispatches to the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Start,
    Stop,
    ResetDaily,
    ViewSessions,
    ViewGraph,
}

#[derive(Debug)]
pub struct App {
    pub tracker: Tracker,
    pub ledger: Ledger,
    pub store: FileStateStore,
    pub session_log: Option<SessionLog>,
    pub screen: Screen,
    pub status: Option<String>,
}

impl App {
    pub fn new(store: FileStateStore) -> Self {
        let ledger = store.load();
        Self {
            tracker: Tracker::new(),
            ledger,
            store,
            session_log: SessionLog::new(),
            screen: Screen::Timer,
            status: None,
        }
    }

    pub fn dispatch(&mut self, cmd: Command) {
        match cmd {
            // Start only touches ephemeral state, so nothing is persisted
            Command::Start => self.tracker.start(),
            Command::Stop => self.stop_session(),
            Command::ResetDaily => self.show(Screen::ConfirmReset),
            Command::ViewSessions => self.show(Screen::Sessions),
            Command::ViewGraph => self.show(Screen::Graph),
        }
    }

    fn show(&mut self, screen: Screen) {
        debug!("switching to {} view", screen);
        self.screen = screen;
    }

    fn stop_session(&mut self) {
        // Stop while Idle is a no-op, not an error
        let Some(session) = self.tracker.stop() else {
            return;
        };

        let today = Local::now().date_naive();
        let coins = self.ledger.record_session(session.clone(), today);

        if let Some(log) = &self.session_log {
            if let Err(e) = log.append(&session, coins) {
                log::warn!("session log write failed: {e}");
            }
        }

        self.status = Some(format!(
            "Session saved: earned {coins} coin{} this session",
            if coins == 1 { "" } else { "s" }
        ));
        self.persist();
    }

    /// User answered yes on the confirmation screen
    pub fn confirm_daily_reset(&mut self) {
        self.ledger.daily_reset(Local::now().date_naive());
        self.status = Some("Daily hours reset".to_string());
        self.screen = Screen::Timer;
        self.persist();
    }

    /// User declined: abort with no state change
    pub fn decline_daily_reset(&mut self) {
        self.screen = Screen::Timer;
    }

    /// Driven by the rollover monitor's once-per-minute tick. The date check
    /// runs here, on the event loop, through the same mutation path as user
    /// commands.
    pub fn on_rollover_tick(&mut self, today: NaiveDate) {
        if self.ledger.rollover_due(today) {
            self.ledger.daily_reset(today);
            self.status = Some("New day: daily counters reset".to_string());
            self.persist();
        }
    }

    /// Flush to disk. A failed write leaves the in-memory state authoritative
    /// and surfaces as a status-line warning.
    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.ledger) {
            error!(
                "failed to persist state to {}: {e}",
                self.store.path().display()
            );
            self.status = Some(format!("WARNING: could not save state ({e})"));
        }
    }

    /// One final flush at shutdown
    pub fn flush(&mut self) {
        self.persist();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(FileStateStore::with_path(&cli.data_file));
    let result = start_tui(&mut terminal, &mut app);

    // Flush the latest state once more on the way out
    app.flush();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let events = CrosstermEventSource::new();
    let monitor = RolloverMonitor::spawn(events.sender(), ROLLOVER_PERIOD);
    let runner = Runner::new(events, FixedTicker::new(Duration::from_millis(TICK_RATE_MS)));

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick | AppEvent::Resize => {}
            AppEvent::RolloverTick => {
                app.on_rollover_tick(Local::now().date_naive());
            }
            AppEvent::Key(key) => {
                if handle_key(app, key) {
                    break;
                }
            }
        }
        terminal.draw(|f| ui(app, f))?;
    }

    // Cooperative stop; the thread exits at its next tick boundary
    monitor.stop();
    Ok(())
}

/// Translate a key press into a command for the current screen.
/// Returns true when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.screen {
        Screen::Timer => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(' ') => {
                if app.tracker.is_running() {
                    app.dispatch(Command::Stop);
                } else {
                    app.dispatch(Command::Start);
                }
            }
            KeyCode::Char('r') => app.dispatch(Command::ResetDaily),
            KeyCode::Char('v') => app.dispatch(Command::ViewSessions),
            KeyCode::Char('g') => app.dispatch(Command::ViewGraph),
            _ => {}
        },
        Screen::Sessions | Screen::Graph => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('b') | KeyCode::Esc | KeyCode::Backspace => {
                app.screen = Screen::Timer;
            }
            _ => {}
        },
        Screen::ConfirmReset => match key.code {
            KeyCode::Char('y') => app.confirm_daily_reset(),
            KeyCode::Char('n') | KeyCode::Esc => app.decline_daily_reset(),
            _ => {}
        },
    }

    false
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
