use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pickapal_core::config::{user_config_path, LOCAL_CONFIG_FILE};
use pickapal_core::PickConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default config file
    Init(InitArgs),
    /// Show the effective config as TOML
    Show,
    /// Show config file paths
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Write ./pickapal.toml instead of the user config
    #[arg(long)]
    pub local: bool,

    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

/// Load the config named on the command line, or the layered default
pub fn load_config(explicit: Option<&Path>) -> Result<PickConfig> {
    match explicit {
        Some(path) => PickConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(PickConfig::load()),
    }
}

pub fn run_config(args: ConfigArgs, config: &PickConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(config),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        user_config_path().context("Could not determine home directory")?
    };

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    PickConfig::default()
        .write_to(&config_path)
        .context("Failed to write config")?;

    println!("✅ Wrote config to {}", config_path.display());
    Ok(())
}

fn run_show(config: &PickConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_path() -> Result<()> {
    match user_config_path() {
        Some(path) => println!("user:  {}", path.display()),
        None => println!("user:  (no home directory)"),
    }
    println!("local: {}", LOCAL_CONFIG_FILE);
    Ok(())
}
