//! Tracing setup for the pickapal CLI
//!
//! Usage:
//!   pickapal --debug ...                  # Debug logging
//!   pickapal --log-file pickapal.log      # Log to a file (useful with the TUI)
//!   RUST_LOG=pickapal_core=debug pickapal # Fine-grained log control
//!
//! Console logs go to stderr so command output on stdout stays clean. The TUI
//! owns the terminal, so without a log file interactive mode discards logs.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
    /// Append logs to this file instead of stderr
    pub log_file: Option<PathBuf>,
    /// The terminal is in use by the TUI; never write logs to it
    pub interactive: bool,
}

fn env_filter(config: &TracingConfig) -> EnvFilter {
    if config.debug {
        // Debug mode: set debug level unless RUST_LOG is explicitly set
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize tracing based on configuration
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = env_filter(config);

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.debug)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .compact()
            .try_init()
            .map_err(|err| anyhow!(err));
    }

    if config.interactive {
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .try_init()
            .map_err(|err| anyhow!(err));
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
