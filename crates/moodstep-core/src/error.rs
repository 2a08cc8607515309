//! Core error types for moodstep-core.
//!
//! Aggregators never fail; errors only surface from configuration I/O and
//! from constructors that validate caller input. Refused check-in
//! transitions live in [`crate::checkin::CheckinRejection`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for moodstep-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDirUnavailable(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was blank
    #[error("'{field}' must not be empty")]
    EmptyField { field: String },

    /// Weekly target outside 0..=7
    #[error("days per week must be between 0 and 7, got {0}")]
    DaysPerWeekOutOfRange(u32),

    /// Subject id not present in the snapshot
    #[error("No {kind} with id '{id}'")]
    UnknownSubject { kind: String, id: String },

    /// Completion attempted twice on the same task
    #[error("Task '{0}' is already completed")]
    AlreadyCompleted(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
