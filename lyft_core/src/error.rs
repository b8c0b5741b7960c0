//! Error types for the lyft_core library.

use crate::week::WeekId;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lyft_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Exercise name has no catalog entry
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// No summary row exists for the week
    #[error("No summary row for week {0}")]
    UnknownWeek(WeekId),

    /// Unparseable date or nonexistent ISO week
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Input rejected before touching the log
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Persistence store error
    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// True for errors caused by bad input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownExercise(_)
                | Error::UnknownWeek(_)
                | Error::InvalidDate(_)
                | Error::Validation(_)
        )
    }
}
