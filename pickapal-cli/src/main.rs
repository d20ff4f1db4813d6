//! pickapal CLI - pick a random pal from a list of names
//!
//! This is the main entry point for the pickapal command-line tool, which provides:
//! - An interactive TUI for building a roster and picking from it (default)
//! - One-shot picks from names given on the command line (`pick` subcommand)
//! - Scripted roster sessions read from a file or stdin (`script` subcommand)
//! - Config file management (`config` subcommand)

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pickapal_core::{seeded_rng, PickConfig};
use tracing::debug;

mod command;
mod commands;
mod config;
mod tracing_setup;
mod tui;

#[derive(Parser, Debug)]
#[command(
    name = "pickapal",
    author,
    version,
    about = "Keep a list of names and pick one at random",
    long_about = "Build a roster of names, pick a random winner (optionally removing them), \
                  and save or restore a snapshot of the list. Runs an interactive TUI when \
                  no subcommand is given."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Load config from this file only (skips the layered lookup)
    #[arg(long, global = true, env = "PICKAPAL_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the interactive roster (default)
    Tui(TuiArgs),
    /// Pick names at random from the command line
    Pick(commands::pick::PickArgs),
    /// Run roster commands from a file or stdin
    Script(commands::script::ScriptArgs),
    /// Manage pickapal configuration (init, show, path)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug, Default)]
struct TuiArgs {
    /// Start with the built-in sample names
    #[arg(long)]
    sample: bool,

    /// Seed the random generator for repeatable picks
    #[arg(long)]
    seed: Option<u64>,

    /// Start with remove-on-pick enabled
    #[arg(long)]
    remove_on_pick: bool,
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui(TuiArgs::default()));

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        log_file: cli.log_file,
        interactive: matches!(command, Commands::Tui(_)),
    })?;

    let config = config::load_config(cli.config.as_deref())?;
    debug!(?config, "loaded config");

    match command {
        Commands::Tui(args) => run_tui(args, config)?,
        Commands::Pick(args) => commands::run_pick(args, &config)?,
        Commands::Script(args) => commands::run_script(args, &config)?,
        Commands::Config(args) => config::run_config(args, &config)?,
        Commands::Completions(args) => run_completions(args)?,
    }

    Ok(())
}

fn run_tui(args: TuiArgs, config: PickConfig) -> Result<()> {
    let mut roster = commands::seeded_roster(&config, args.sample, &[]);
    if args.remove_on_pick {
        roster.set_remove_on_pick(true);
    }

    let rng = seeded_rng(args.seed.or(config.picker.seed));
    let app = tui::App::new(roster, rng);

    tui::run(app, Duration::from_millis(config.ui.tick_rate_ms))
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
