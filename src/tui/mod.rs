//! Interactive terminal view of a computed schedule.
//!
//! Feature-gated behind `tui`. Launch with `--tui` on the CLI.

mod controls;
mod layout;
/// Application state and rescheduling.
pub mod runtime;
mod style;

use std::io;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::Scenario;
use runtime::App;

/// Launches the TUI for `scenario`.
///
/// Sets up the terminal (raw mode, alternate screen), runs the event loop,
/// and restores the terminal on exit.
pub fn run(scenario: Scenario) {
    if let Err(e) = enable_raw_mode() {
        eprintln!("error: failed to enable raw mode: {e}");
        std::process::exit(1);
    }
    let mut terminal = open_terminal().unwrap_or_else(|e| bail("failed to open terminal", e));

    let mut app = App::new(scenario);
    let result = event_loop(&mut terminal, &mut app);

    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    if let Err(e) = result {
        bail("TUI crashed", e);
    }
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Switches stdout to the alternate screen and wraps it in a terminal.
fn open_terminal() -> io::Result<Term> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Leaves raw mode, reports `e` and exits with status 1.
fn bail(context: &str, e: io::Error) -> ! {
    let _ = disable_raw_mode();
    eprintln!("error: {context}: {e}");
    std::process::exit(1);
}

/// Draws, then blocks on the next key.
fn event_loop(terminal: &mut Term, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| layout::render(frame, app))?;

        if app.quit {
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            controls::handle_key(app, key);
        }
    }
}
