//! Notices shown to the user after a roster operation

use serde::Serialize;
use std::fmt;

/// Display category of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Validation failure, the roster was left unchanged
    Error,
    /// Informational status after a successful save or load
    Info,
}

/// Which event produced a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeCode {
    EmptyInput,
    DuplicateName,
    EmptyRoster,
    SavingEmptyList,
    LoadingEmptyList,
    Saved,
    Loaded,
}

impl NoticeCode {
    pub fn kind(self) -> NoticeKind {
        match self {
            NoticeCode::Saved | NoticeCode::Loaded => NoticeKind::Info,
            _ => NoticeKind::Error,
        }
    }
}

/// Title shared by the save and load confirmations
pub const SUCCESS_TITLE: &str = "Success";

/// A title/message pair for the host to display as an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub code: NoticeCode,
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(code: NoticeCode, title: &str, message: impl Into<String>) -> Self {
        Self {
            code,
            kind: code.kind(),
            title: title.to_string(),
            message: message.into(),
        }
    }

    /// Standard notice text for a code
    ///
    /// `DuplicateName` has no entry to name here; prefer [`Notice::duplicate`].
    pub fn from_code(code: NoticeCode) -> Self {
        match code {
            NoticeCode::EmptyInput => {
                Self::new(code, "Empty name", "Type a name before adding it.")
            }
            NoticeCode::DuplicateName => {
                Self::new(code, "Duplicate name", "That name is already on the list.")
            }
            NoticeCode::EmptyRoster => {
                Self::new(code, "No names", "Add some names before picking.")
            }
            NoticeCode::SavingEmptyList => {
                Self::new(code, "Nothing to save", "The list is empty.")
            }
            NoticeCode::LoadingEmptyList => {
                Self::new(code, "Nothing to load", "No list has been saved yet.")
            }
            NoticeCode::Saved => Self::new(code, SUCCESS_TITLE, "The list was saved."),
            NoticeCode::Loaded => Self::new(code, SUCCESS_TITLE, "The saved list was loaded."),
        }
    }

    pub fn duplicate(name: &str) -> Self {
        Self::new(
            NoticeCode::DuplicateName,
            "Duplicate name",
            format!("\"{}\" is already on the list.", name),
        )
    }

    pub fn saved() -> Self {
        Self::from_code(NoticeCode::Saved)
    }

    pub fn loaded() -> Self {
        Self::from_code(NoticeCode::Loaded)
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
