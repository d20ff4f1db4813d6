//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Mode};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return HandleResult::Continue;
    }

    // Global quit shortcuts (Ctrl+C, Ctrl+Q)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return HandleResult::Quit,
            _ => {}
        }
    }

    // Any key acknowledges an open alert or help overlay
    if app.has_overlay() {
        app.dismiss_overlay();
        return HandleResult::Continue;
    }

    // Button shortcuts available from any mode
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('p') => app.pick(),
            KeyCode::Char('s') => app.save(),
            KeyCode::Char('l') => app.load(),
            KeyCode::Char('r') => app.toggle_remove_on_pick(),
            _ => {}
        }
        return finish(app);
    }

    match app.mode {
        Mode::Edit => handle_edit_mode(app, key),
        Mode::Normal => handle_normal_mode(app, key),
    }

    finish(app)
}

fn finish(app: &App) -> HandleResult {
    if app.should_quit {
        HandleResult::Quit
    } else {
        HandleResult::Continue
    }
}

/// Handle keys in edit mode (entry field)
fn handle_edit_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_edit(),
        KeyCode::Tab => {
            if !app.complete_input() {
                app.exit_edit();
            }
        }
        KeyCode::Enter => app.submit_entry(),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Delete => app.input_delete(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::Char(c) => app.input_insert(c),
        _ => {}
    }
}

/// Handle keys in normal (button) mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Back to the entry field
        KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Tab | KeyCode::Enter => {
            app.enter_edit()
        }

        // Buttons
        KeyCode::Char('p') | KeyCode::Char(' ') => app.pick(),
        KeyCode::Char('s') => app.save(),
        KeyCode::Char('l') => app.load(),
        KeyCode::Char('r') => app.toggle_remove_on_pick(),
        KeyCode::Char('c') => app.clear(),
        KeyCode::Char('?') => app.show_help(),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),

        _ => {}
    }
}
