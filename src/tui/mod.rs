//! Interactive terminal front end.

mod actions;
mod app;
mod input;
mod ui;

pub use app::App;

use crossterm::{
    ExecutableCommand,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, stdout};

/// Take over the terminal and run until the user quits.
pub fn run(app: &mut App) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(DisableMouseCapture);
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    log::info!(
        "interactive session on a {}x{} sheet",
        app.sheet.rows(),
        app.sheet.cols()
    );
    input::run_app(&mut terminal, app)
}
