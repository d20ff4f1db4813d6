//! Replay roster commands from a file or stdin

use std::fmt::Write as _;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use pickapal_core::{seeded_rng, PickConfig, RosterView};
use tracing::{debug, instrument};

use super::seeded_roster;
use crate::command::{self, Command, Outcome};

#[derive(Parser, Debug)]
pub struct ScriptArgs {
    /// Script file with one command per line (reads stdin if omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Include the built-in sample names before running
    #[arg(long)]
    pub sample: bool,

    /// Seed the random generator for repeatable picks
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the final state as JSON (notices go to stderr)
    #[arg(long)]
    pub json: bool,

    /// Print every roster change as a JSON line on stderr
    #[arg(long)]
    pub echo: bool,

    /// Exit with an error if any command was rejected
    #[arg(long)]
    pub strict: bool,
}

#[instrument(skip_all)]
pub fn run_script(args: ScriptArgs, config: &PickConfig) -> Result<()> {
    let source = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read script from stdin")?;
            buf
        }
    };

    let mut roster = seeded_roster(config, args.sample, &[]);
    let mut rng = seeded_rng(args.seed.or(config.picker.seed));

    if args.echo {
        roster.subscribe(|change| {
            if let Ok(line) = serde_json::to_string(change) {
                eprintln!("{}", line);
            }
        });
    }

    // Per-command output goes to stderr when stdout carries JSON
    let report = |line: String| {
        if args.json {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };

    let mut rejected = 0usize;

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let Some(cmd) = command::parse_script_line(line) else {
            continue;
        };
        debug!(line = line_no, ?cmd, "running script command");

        match command::apply(&mut roster, &mut rng, &cmd) {
            Outcome::Applied => {
                // Save and load confirm with an informational notice
                if matches!(cmd, Command::Save | Command::Load) {
                    if let Some(notice) = roster.notice() {
                        report(notice.to_string());
                    }
                }
            }
            Outcome::Picked(name) => report(format!("Picked: {}", name)),
            Outcome::Rejected(err) => {
                rejected += 1;
                report(format!("line {}: {}", line_no, err.notice()));
            }
            Outcome::Show => report(render_text(&roster.view())),
            Outcome::Help => report(command::get_help_text().to_string()),
            Outcome::Quit => break,
            Outcome::Unknown(cmd) => bail!("line {}: unknown command '{}'", line_no, cmd),
        }
    }

    let view = roster.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render_text(&view));
    }

    if args.strict && rejected > 0 {
        bail!("{} command(s) rejected", rejected);
    }
    Ok(())
}

/// Plain-text rendering of roster state
pub fn render_text(view: &RosterView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Names ({}):", view.names.len());
    for (idx, name) in view.names.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", idx + 1, name);
    }
    let _ = writeln!(out, "Picked: {}", view.picked_label);
    let _ = writeln!(
        out,
        "Remove on pick: {}",
        if view.remove_on_pick { "on" } else { "off" }
    );
    let _ = write!(out, "Saved names: {}", view.saved_count);
    if let Some(notice) = &view.notice {
        let _ = write!(out, "\nNotice: {}", notice);
    }

    out
}
