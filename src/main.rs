use anyhow::{Context, Result};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use scopeguard::defer;
use std::{io, process, time::SystemTime};

use stickman_showdown::app::App;

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

fn main() -> Result<()> {
    let _guard = TerminalGuard;
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
    defer! {
        let _ = execute!(io::stdout(), cursor::Show);
    }

    let seed = {
        let time = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)?
            .as_nanos();
        let pid = process::id();
        (time ^ (pid as u128)) as u64
    };

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(seed);
    if let Err(e) = app.run(&mut terminal) {
        drop(terminal);
        eprintln!("Game crashed: {}", error::handle_error(&e));
    }

    Ok(())
}
