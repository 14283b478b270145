pub mod pattern;
pub mod runtime;
pub mod session;
pub mod ui;

use crate::{
    runtime::{CrosstermEventSource, Runner, SessionEvent},
    session::{Phase, Session},
};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

const TICK_RATE_MS: u64 = 1000;

/// calm guided-breathing tui with a segmented phase progress bar
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A calm breathing timer for the terminal. Walks you through named phases (inhale, hold, exhale) with a segmented progress bar that fills one segment per second, for as many cycles as you ask for."
)]
pub struct Cli {
    /// number of breathing cycles to run
    #[clap(short = 'c', long, default_value_t = 1)]
    cycles: u32,

    /// built-in breathing pattern
    #[clap(short = 'p', long, value_enum, default_value_t = SupportedPattern::Relaxing)]
    pattern: SupportedPattern,

    /// custom phase sequence like "inhale:4,hold:7,exhale:8" (overrides --pattern)
    #[clap(long)]
    custom: Option<String>,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum SupportedPattern {
    Relaxing,
    BoxBreathing,
    Coherent,
}

impl SupportedPattern {
    fn phases(&self) -> Vec<Phase> {
        match self {
            SupportedPattern::Relaxing => pattern::relaxing(),
            SupportedPattern::BoxBreathing => pattern::box_breathing(),
            SupportedPattern::Coherent => pattern::coherent(),
        }
    }
}

impl Cli {
    /// Build the session described by the command line, coercing any
    /// out-of-range cycle count to the minimum of one.
    fn to_session(&self) -> Session {
        let phases = match &self.custom {
            Some(spec) => pattern::parse_custom(spec),
            None => self.pattern.phases(),
        };
        Session::new(phases, self.cycles.max(1))
    }
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
}

impl App {
    pub fn new(cli: &Cli) -> Self {
        Self {
            session: cli.to_session(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
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

    let mut app = App::new(&cli);
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let source = CrosstermEventSource::new(Duration::from_millis(TICK_RATE_MS));
    let runner = Runner::new(source);

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while let Some(event) = runner.step() {
        match event {
            SessionEvent::Tick => {
                if app.session.is_running() {
                    app.session.tick();
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
            }
            SessionEvent::Resize => {
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            SessionEvent::Key(key) => {
                if handle_key(key, app) {
                    break;
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}

/// Apply one key press to the app. Returns true when the app should exit.
fn handle_key(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('q') => return true,
        KeyCode::Char('s') | KeyCode::Char(' ') | KeyCode::Enter => app.session.start(),
        KeyCode::Char('r') => app.session.reset(),
        // Cycle adjustment is only honored while idle; set_total_cycles
        // ignores it during a run.
        KeyCode::Up | KeyCode::Char('+') => {
            let n = app.session.total_cycles().saturating_add(1);
            app.session.set_total_cycles(n);
        }
        KeyCode::Down | KeyCode::Char('-') => {
            let n = app.session.total_cycles().saturating_sub(1);
            app.session.set_total_cycles(n);
        }
        _ => {}
    }
    false
}
