//! Roster command parsing
//!
//! Shared by the TUI entry field (where commands start with `/`) and by
//! `pickapal script` (where the leading `/` is optional).
//!
//! Supported commands:
//! - `/add <name>` - Add a name
//! - `/type <text>` - Stage text in the entry field
//! - `/submit` - Add the staged text
//! - `/pick` - Pick a random name
//! - `/save`, `/load` - Save or restore the snapshot
//! - `/clear` - Remove every current name
//! - `/toggle [on|off]` - Set or flip remove-on-pick
//! - `/dismiss` - Dismiss the current notice
//! - `/show` - Print the roster
//! - `/help`, `/quit`

use pickapal_core::{NameRoster, RosterError};
use rand::Rng;

/// A parsed roster command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add { name: String },
    Type { text: String },
    Submit,
    Pick,
    Save,
    Load,
    Clear,
    /// `None` flips the current setting
    Toggle(Option<bool>),
    Dismiss,
    Show,
    Help,
    Quit,
    Unknown { cmd: String, args: String },
}

/// Result of parsing entry field content
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// A command was found
    Command(Command),
    /// Not a command: a name to add
    Text(String),
    /// Just a `/` with no command yet
    Incomplete,
}

/// What happened when a command ran against the roster
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The roster accepted the command
    Applied,
    /// A name was picked
    Picked(String),
    /// The roster rejected the command and raised a notice
    Rejected(RosterError),
    Show,
    Help,
    Quit,
    Unknown(String),
}

/// Parse entry field content; only text starting with `/` is a command
pub fn parse_entry(input: &str) -> ParseResult {
    let trimmed = input.trim();

    let Some(without_slash) = trimmed.strip_prefix('/') else {
        return ParseResult::Text(trimmed.to_string());
    };

    if without_slash.is_empty() {
        return ParseResult::Incomplete;
    }

    ParseResult::Command(parse_command(without_slash))
}

/// Parse one script line; blank lines and `#` comments yield `None`
pub fn parse_script_line(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let body = trimmed.strip_prefix('/').unwrap_or(trimmed);
    if body.is_empty() {
        return None;
    }
    Some(parse_command(body))
}

/// Parse a command body (without the leading `/`)
pub fn parse_command(body: &str) -> Command {
    let mut parts = body.trim().splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_lowercase();
    // Keep argument text as typed; add/type trim or stage it themselves
    let args = parts.next().unwrap_or("");

    match cmd.as_str() {
        "add" | "a" => Command::Add {
            name: args.to_string(),
        },
        "type" | "t" => Command::Type {
            text: args.to_string(),
        },
        "submit" => Command::Submit,
        "pick" | "p" => Command::Pick,
        "save" | "s" => Command::Save,
        "load" | "l" => Command::Load,
        "clear" | "c" => Command::Clear,
        "toggle" | "remove-on-pick" | "r" => match args.trim().to_lowercase().as_str() {
            "" => Command::Toggle(None),
            "on" | "true" | "yes" | "1" => Command::Toggle(Some(true)),
            "off" | "false" | "no" | "0" => Command::Toggle(Some(false)),
            _ => Command::Unknown {
                cmd,
                args: args.trim().to_string(),
            },
        },
        "dismiss" | "ok" => Command::Dismiss,
        "show" | "list" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown {
            cmd,
            args: args.trim().to_string(),
        },
    }
}

/// Run a command against the roster
pub fn apply<R: Rng + ?Sized>(roster: &mut NameRoster, rng: &mut R, command: &Command) -> Outcome {
    let result = match command {
        Command::Add { name } => roster.add_name(name),
        Command::Type { text } => {
            roster.update_pending_input(text.as_str());
            Ok(())
        }
        Command::Submit => roster.submit_pending(),
        Command::Pick => {
            return match roster.pick_random_with(rng) {
                Ok(name) => Outcome::Picked(name),
                Err(err) => Outcome::Rejected(err),
            };
        }
        Command::Save => roster.save_snapshot(),
        Command::Load => roster.load_snapshot(),
        Command::Clear => {
            roster.clear();
            Ok(())
        }
        Command::Toggle(value) => {
            let enabled = value.unwrap_or(!roster.remove_on_pick());
            roster.set_remove_on_pick(enabled);
            Ok(())
        }
        Command::Dismiss => {
            roster.dismiss_notice();
            Ok(())
        }
        Command::Show => return Outcome::Show,
        Command::Help => return Outcome::Help,
        Command::Quit => return Outcome::Quit,
        Command::Unknown { cmd, args } => {
            let shown = if args.is_empty() {
                cmd.clone()
            } else {
                format!("{} {}", cmd, args)
            };
            return Outcome::Unknown(shown);
        }
    };

    match result {
        Ok(()) => Outcome::Applied,
        Err(err) => Outcome::Rejected(err),
    }
}

/// Get command completions for partial input
pub fn get_completions(partial: &str) -> Vec<&'static str> {
    let commands = [
        "/add", "/pick", "/save", "/load", "/clear", "/toggle", "/dismiss", "/help", "/quit",
    ];

    if partial.is_empty() || partial == "/" {
        return commands.to_vec();
    }

    let partial_lower = partial.to_lowercase();
    commands
        .into_iter()
        .filter(|cmd| cmd.starts_with(&partial_lower))
        .collect()
}

/// Get help text for commands
pub fn get_help_text() -> &'static str {
    r#"Type a name and press Enter to add it.

Commands (type in the entry field):
  /pick            - Pick a random name
  /save            - Save the current list
  /load            - Replace the list with the saved one
  /clear           - Remove every name
  /toggle [on|off] - Remove picked names from the list
  /help            - Show this help
  /quit            - Quit

Keys:
  Enter            - Add name / run command
  Esc or Tab       - Switch to button mode
  p or Space       - Pick (button mode)
  s / l            - Save / load (button mode)
  r                - Toggle remove-on-pick (button mode)
  c                - Clear list (button mode)
  Ctrl+P/S/L/R     - Pick / save / load / toggle from any mode
  q or Ctrl+C      - Quit

Shortcuts: /p=pick, /s=save, /l=load, /c=clear, /r=toggle"#
}
