//! Core application state and mode management

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use pickapal_core::{NameRoster, RosterChange};
use rand::rngs::StdRng;

use crate::command::{self, Command, Outcome, ParseResult};

/// Activity entries kept for the activity pane
const ACTIVITY_LIMIT: usize = 50;

/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Typing into the entry field
    #[default]
    Edit,
    /// Single-key buttons: pick, save, load, toggle
    Normal,
}

/// Main application state
///
/// The roster is the source of truth for everything it renders; the app only
/// adds terminal concerns (cursor, selection, overlays).
pub struct App {
    /// Names, snapshot, picked name, toggle and notice
    pub roster: NameRoster,
    /// Random source for picks
    pub rng: StdRng,
    /// Current input mode
    pub mode: Mode,
    /// Cursor position in the entry field, in chars
    pub input_cursor: usize,
    /// Currently highlighted name in the list
    pub selected_index: usize,
    /// Scroll offset for the names list
    pub scroll_offset: usize,
    /// Help overlay text (when open)
    pub help_text: Option<&'static str>,
    /// Command completions for the entry field
    pub completions: Vec<&'static str>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Recent roster changes, newest last
    activity: Rc<RefCell<VecDeque<RosterChange>>>,
    /// Roster revision at last draw
    drawn_revision: Option<u64>,
    /// Non-roster state changed since last draw
    dirty: bool,
}

impl App {
    /// Create an app around a roster, subscribing to its changes
    pub fn new(mut roster: NameRoster, rng: StdRng) -> Self {
        let activity = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&activity);
        roster.subscribe(move |change: &RosterChange| {
            let mut log = sink.borrow_mut();
            if let RosterChange::PendingInputChanged { .. } = change {
                return;
            }
            if log.len() == ACTIVITY_LIMIT {
                log.pop_front();
            }
            log.push_back(change.clone());
        });

        let input_cursor = roster.pending_input().chars().count();

        Self {
            roster,
            rng,
            mode: Mode::Edit,
            input_cursor,
            selected_index: 0,
            scroll_offset: 0,
            help_text: None,
            completions: Vec::new(),
            should_quit: false,
            activity,
            drawn_revision: None,
            dirty: true,
        }
    }

    /// Whether anything changed since the last draw
    pub fn needs_redraw(&self) -> bool {
        self.dirty || self.drawn_revision != Some(self.roster.revision())
    }

    /// Record that the current state has been drawn
    pub fn mark_drawn(&mut self) {
        self.drawn_revision = Some(self.roster.revision());
        self.dirty = false;
    }

    /// Force a redraw on the next loop iteration
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Recent roster changes, newest first
    pub fn recent_activity(&self, limit: usize) -> Vec<RosterChange> {
        self.activity
            .borrow()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Enter edit mode for the entry field
    pub fn enter_edit(&mut self) {
        self.mode = Mode::Edit;
        self.input_cursor = self.input_cursor.min(self.input_len());
        self.dirty = true;
    }

    /// Exit edit mode back to button mode
    pub fn exit_edit(&mut self) {
        self.mode = Mode::Normal;
        self.completions.clear();
        self.dirty = true;
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.help_text = Some(command::get_help_text());
        self.dirty = true;
    }

    /// Dismiss help overlay
    pub fn dismiss_help(&mut self) {
        self.help_text = None;
        self.dirty = true;
    }

    /// Whether a modal (notice or help) is covering the screen
    pub fn has_overlay(&self) -> bool {
        self.help_text.is_some() || self.roster.notice().is_some()
    }

    /// Close whichever overlay is on top
    pub fn dismiss_overlay(&mut self) {
        if self.roster.notice().is_some() {
            self.roster.dismiss_notice();
        } else {
            self.dismiss_help();
        }
    }

    fn input_len(&self) -> usize {
        self.roster.pending_input().chars().count()
    }

    /// Byte offset of a char position in the entry text
    fn byte_offset(&self, char_pos: usize) -> usize {
        let input = self.roster.pending_input();
        input
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(input.len())
    }

    fn set_input(&mut self, text: String) {
        self.roster.update_pending_input(text);
        self.completions = if self.roster.pending_input().starts_with('/') {
            command::get_completions(self.roster.pending_input())
        } else {
            Vec::new()
        };
    }

    /// Insert a character at the cursor
    pub fn input_insert(&mut self, c: char) {
        let mut text = self.roster.pending_input().to_string();
        text.insert(self.byte_offset(self.input_cursor), c);
        self.input_cursor += 1;
        self.set_input(text);
    }

    /// Delete the character before the cursor
    pub fn input_backspace(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        self.input_cursor -= 1;
        let mut text = self.roster.pending_input().to_string();
        text.remove(self.byte_offset(self.input_cursor));
        self.set_input(text);
    }

    /// Delete the character under the cursor
    pub fn input_delete(&mut self) {
        if self.input_cursor >= self.input_len() {
            return;
        }
        let mut text = self.roster.pending_input().to_string();
        text.remove(self.byte_offset(self.input_cursor));
        self.set_input(text);
    }

    pub fn cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
        self.dirty = true;
    }

    pub fn cursor_right(&mut self) {
        self.input_cursor = (self.input_cursor + 1).min(self.input_len());
        self.dirty = true;
    }

    pub fn cursor_home(&mut self) {
        self.input_cursor = 0;
        self.dirty = true;
    }

    pub fn cursor_end(&mut self) {
        self.input_cursor = self.input_len();
        self.dirty = true;
    }

    /// Complete the entry text to the first matching command
    pub fn complete_input(&mut self) -> bool {
        match self.completions.first() {
            Some(completion) => {
                let text = format!("{} ", completion);
                self.input_cursor = text.chars().count();
                self.set_input(text);
                true
            }
            None => false,
        }
    }

    /// Submit the entry field: add a name or run a `/command`
    pub fn submit_entry(&mut self) {
        match command::parse_entry(self.roster.pending_input()) {
            ParseResult::Command(cmd) => {
                self.input_cursor = 0;
                self.set_input(String::new());
                self.run_command(cmd);
                // `/type` may have staged new entry text
                self.input_cursor = self.input_len();
            }
            ParseResult::Incomplete => self.show_help(),
            ParseResult::Text(_) => {
                if self.roster.submit_pending().is_ok() {
                    self.input_cursor = 0;
                    self.completions.clear();
                    self.select_last();
                }
            }
        }
    }

    /// Run a parsed command
    pub fn run_command(&mut self, cmd: Command) {
        match command::apply(&mut self.roster, &mut self.rng, &cmd) {
            // Rejections already raised a notice on the roster
            Outcome::Applied | Outcome::Picked(_) | Outcome::Rejected(_) | Outcome::Show => {}
            Outcome::Help => self.show_help(),
            Outcome::Quit => self.should_quit = true,
            Outcome::Unknown(cmd) => {
                self.help_text = Some(command::get_help_text());
                tracing::debug!(cmd = %cmd, "unknown command");
            }
        }
        self.clamp_selection();
        self.dirty = true;
    }

    pub fn pick(&mut self) {
        self.run_command(Command::Pick);
    }

    pub fn save(&mut self) {
        self.run_command(Command::Save);
    }

    pub fn load(&mut self) {
        self.run_command(Command::Load);
    }

    pub fn clear(&mut self) {
        self.run_command(Command::Clear);
    }

    pub fn toggle_remove_on_pick(&mut self) {
        self.run_command(Command::Toggle(None));
    }

    /// Select next name in the list
    pub fn select_next(&mut self) {
        let len = self.roster.len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
            self.ensure_visible();
        }
        self.dirty = true;
    }

    /// Select previous name in the list
    pub fn select_prev(&mut self) {
        let len = self.roster.len();
        if len > 0 {
            self.selected_index = self
                .selected_index
                .checked_sub(1)
                .unwrap_or(len.saturating_sub(1));
            self.ensure_visible();
        }
        self.dirty = true;
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.dirty = true;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.roster.len().saturating_sub(1);
        self.dirty = true;
    }

    fn clamp_selection(&mut self) {
        let last = self.roster.len().saturating_sub(1);
        if self.selected_index > last {
            self.selected_index = last;
        }
        if self.scroll_offset > self.selected_index {
            self.scroll_offset = self.selected_index;
        }
    }

    /// Ensure selected item is visible
    fn ensure_visible(&mut self) {
        // Keep 2 items of context when scrolling
        const CONTEXT: usize = 2;

        if self.selected_index < self.scroll_offset + CONTEXT {
            self.scroll_offset = self.selected_index.saturating_sub(CONTEXT);
        }
    }

    /// Scroll so the selection fits in a list of `height` rows
    pub fn fit_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected_index >= self.scroll_offset + height {
            self.scroll_offset = self.selected_index + 1 - height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickapal_core::{seeded_rng, NoticeCode};

    fn app_with(names: &[&str]) -> App {
        let mut roster = NameRoster::new();
        roster.seed(names.iter());
        App::new(roster, seeded_rng(Some(3)))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.input_insert(c);
        }
    }

    #[test]
    fn test_typing_mirrors_into_roster() {
        let mut app = app_with(&[]);
        type_text(&mut app, "Ana");
        app.cursor_left();
        app.input_backspace();

        assert_eq!(app.roster.pending_input(), "Aa");
        assert_eq!(app.input_cursor, 1);
    }

    #[test]
    fn test_cursor_handles_multibyte_chars() {
        let mut app = app_with(&[]);
        type_text(&mut app, "Zoë");
        app.cursor_home();
        app.input_delete();
        app.cursor_end();
        app.input_backspace();

        assert_eq!(app.roster.pending_input(), "o");
    }

    #[test]
    fn test_submit_adds_and_clears_entry() {
        let mut app = app_with(&["Elisha"]);
        type_text(&mut app, " Andre ");
        app.submit_entry();

        assert_eq!(app.roster.names(), ["Elisha", "Andre"]);
        assert_eq!(app.roster.pending_input(), "");
        assert_eq!(app.input_cursor, 0);
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_duplicate_submit_keeps_entry_and_raises_notice() {
        let mut app = app_with(&["Elisha"]);
        type_text(&mut app, "ELISHA");
        app.submit_entry();

        assert_eq!(app.roster.pending_input(), "ELISHA");
        assert_eq!(app.roster.notice().unwrap().code, NoticeCode::DuplicateName);
        assert!(app.has_overlay());

        app.dismiss_overlay();
        assert!(!app.has_overlay());
    }

    #[test]
    fn test_slash_command_runs_and_clears_entry() {
        let mut app = app_with(&["Jasmine"]);
        type_text(&mut app, "/pick");
        app.submit_entry();

        assert_eq!(app.roster.picked(), Some("Jasmine"));
        assert_eq!(app.roster.pending_input(), "");
    }

    #[test]
    fn test_type_command_leaves_cursor_after_staged_text() {
        let mut app = app_with(&[]);
        type_text(&mut app, "/type Ana");
        app.submit_entry();

        assert_eq!(app.roster.pending_input(), "Ana");
        assert_eq!(app.input_cursor, 3);

        app.input_insert('s');
        assert_eq!(app.roster.pending_input(), "Anas");
    }

    #[test]
    fn test_pick_with_removal_clamps_selection() {
        let mut app = app_with(&["Elisha", "Andre"]);
        app.toggle_remove_on_pick();
        app.select_last();
        app.pick();
        app.pick();

        assert!(app.roster.is_empty());
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_activity_records_changes_without_keystrokes() {
        let mut app = app_with(&[]);
        type_text(&mut app, "Po-Chun");
        app.submit_entry();
        app.save();

        let recent = app.recent_activity(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0], RosterChange::Saved { count: 1 });
    }

    #[test]
    fn test_redraw_tracks_revision() {
        let mut app = app_with(&["Elisha"]);
        assert!(app.needs_redraw());

        app.mark_drawn();
        assert!(!app.needs_redraw());

        app.pick();
        assert!(app.needs_redraw());
    }

    #[test]
    fn test_completion_fills_command() {
        let mut app = app_with(&[]);
        type_text(&mut app, "/sa");
        assert!(app.complete_input());
        assert_eq!(app.roster.pending_input(), "/save ");
    }
}
