//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use super::app::App;
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the TUI application until the user quits
pub fn run(mut app: App, tick_rate: Duration) -> Result<()> {
    let mut terminal = init_terminal()?;
    info!(names = app.roster.len(), "starting interactive roster");

    let result = run_loop(&mut terminal, &mut app, tick_rate);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    loop {
        if app.needs_redraw() {
            terminal.draw(|frame| ui::render(frame, app))?;
            app.mark_drawn();
        }

        if let Some(event) = poll_event(tick_rate)? {
            match event {
                Event::Key(key) => {
                    if handle_key(app, key) == HandleResult::Quit {
                        break;
                    }
                }
                Event::Resize(_, _) => app.mark_dirty(),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!(
        names = app.roster.len(),
        saved = app.roster.saved_names().len(),
        "leaving interactive roster"
    );
    Ok(())
}
