//! Error types with fix suggestions

use std::path::PathBuf;

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum PiMenuError {
    // ─────────────────────────────────────────────────────────────
    // Fatal: the menu cannot be built
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid configuration {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Per-action: reported once, user returns to the root menu
    // ─────────────────────────────────────────────────────────────
    #[error("Malformed command (unbalanced quotes): {command}")]
    MalformedCommand { command: String },

    #[error("Failed to start '{program}': {reason}")]
    Spawn { program: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Invariant violation: never shown to the user
    // ─────────────────────────────────────────────────────────────
    #[error("Cannot go back from the root menu")]
    EmptyStack,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PiMenuError {
    /// Whether this error must terminate the application
    pub fn is_fatal(&self) -> bool {
        matches!(self, PiMenuError::ConfigParse { .. })
    }
}

impl FixSuggestion for PiMenuError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            PiMenuError::ConfigParse { .. } => {
                Some("Place a valid pimenu.yaml (a list of items with a 'label') next to the executable")
            }
            PiMenuError::MalformedCommand { .. } => Some("Close every \" in the item's command"),
            PiMenuError::Spawn { .. } => Some("Check the executable exists and is on PATH"),
            PiMenuError::EmptyStack => None,
            PiMenuError::Io(_) => Some("Check file path and permissions"),
        }
    }
}

pub type Result<T> = std::result::Result<T, PiMenuError>;
