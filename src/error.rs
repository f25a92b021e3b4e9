//! Error types for timecraft.

use thiserror::Error;

/// All errors produced by timecraft.
#[derive(Debug, Error)]
pub enum TimeCraftError {
    /// No date field came from the call, the record type, or the config.
    #[error(
        "No date field configured: pass one explicitly, set it on the record type, \
         or set scopes.default_field"
    )]
    UnresolvedField,

    /// The resolved field is not a usable column identifier.
    #[error("Invalid date field: {0:?}")]
    InvalidField(String),

    /// A table or column name is not a plain SQL identifier.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A date/time string could not be parsed.
    #[error("Could not parse date/time value: {value:?}")]
    Parse {
        /// The offending input.
        value: String,
    },

    /// A day count was not an integer.
    #[error("Invalid day count: {0:?} is not an integer")]
    InvalidDays(String),

    /// Calendar arithmetic left chrono's supported range.
    #[error("Date out of range: {0}")]
    OutOfRange(String),

    /// Configuration could not be located, read, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A query failed to execute.
    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimeCraftError {
    /// Build a parse error for the given input.
    pub fn parse(value: impl Into<String>) -> Self {
        Self::Parse {
            value: value.into(),
        }
    }
}

impl From<rusqlite::Error> for TimeCraftError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}
