//! Structured error types for pickapal-core.
//!
//! Roster failures are user-input validation failures: each one leaves the
//! roster untouched and maps to exactly one notice. Configuration failures
//! are the only errors that come from I/O.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::notice::{Notice, NoticeCode};

/// Validation failure raised by a roster operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Entry text was empty after trimming
    #[error("name is empty")]
    EmptyInput,

    /// Entry text matches an existing name, ignoring case
    #[error("'{name}' is already on the list")]
    DuplicateName { name: String },

    /// Pick requested with no names on the list
    #[error("no names to pick from")]
    EmptyRoster,

    /// Save requested with no names on the list
    #[error("cannot save an empty list")]
    SavingEmptyList,

    /// Load requested before anything was saved
    #[error("no saved list to load")]
    LoadingEmptyList,
}

/// Result type alias for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;

impl RosterError {
    /// Create a duplicate name error
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Notice code this failure is displayed as
    pub fn code(&self) -> NoticeCode {
        match self {
            Self::EmptyInput => NoticeCode::EmptyInput,
            Self::DuplicateName { .. } => NoticeCode::DuplicateName,
            Self::EmptyRoster => NoticeCode::EmptyRoster,
            Self::SavingEmptyList => NoticeCode::SavingEmptyList,
            Self::LoadingEmptyList => NoticeCode::LoadingEmptyList,
        }
    }

    /// Build the notice shown for this failure
    pub fn notice(&self) -> Notice {
        match self {
            Self::DuplicateName { name } => Notice::duplicate(name),
            other => Notice::from_code(other.code()),
        }
    }
}

/// Error loading or writing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML for the expected schema
    #[error("Invalid config in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config could not be rendered as TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Home directory could not be determined
    #[error("Could not determine home directory")]
    NoHomeDir,
}

impl ConfigError {
    /// Create an I/O error with the offending path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error with the offending path
    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
