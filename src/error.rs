//! Error types for habitual.

use thiserror::Error;

/// Errors produced by the habitual library.
#[derive(Debug, Error)]
pub enum HabitError {
    /// A caller passed an argument outside the accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A habit, notification, or other record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record with the same identity already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Configuration could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The SQLite store failed.
    #[error("Database error: {0}")]
    Database(String),

    /// User input (dates, numbers) could not be understood.
    #[error("Could not parse input: {0}")]
    Input(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl HabitError {
    /// Shorthand for an [`HabitError::InvalidArgument`].
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
