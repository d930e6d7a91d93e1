//! Core error types for taskradar-core.
//!
//! Scoring and quadrant classification are total and never produce these.
//! Errors come from the edges: task intake validation, the async
//! classification boundary, configuration and the task store.
//!
//! [`CoreError`] covers the persistence layer (config and task store).
//! Intake and classification return [`ValidationError`] and
//! [`ClassifyError`] directly from the operations that produce them.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskradar-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

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
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Title missing or whitespace only
    #[error("task title must not be empty")]
    EmptyTitle,

    /// Stored score outside 0..=10
    #[error("{axis} score {value} is outside 0..=10")]
    ScoreOutOfRange { axis: &'static str, value: i64 },

    /// Stored priority label disagrees with the scores
    #[error("priority '{stored}' does not match scores (urgency {urgency}, importance {importance}); expected '{expected}'")]
    PriorityMismatch {
        stored: String,
        expected: String,
        urgency: u8,
        importance: u8,
    },

    /// Canvas dimensions that leave no plot interior
    #[error("invalid canvas {width}x{height} with padding {padding}: {message}")]
    InvalidCanvas {
        width: f64,
        height: f64,
        padding: f64,
        message: String,
    },

    /// Keyword table entry out of contract
    #[error("invalid keyword entry '{phrase}': {message}")]
    InvalidKeyword { phrase: String, message: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors surfaced by the async classification boundary.
///
/// A failed classification never attaches a score to anything.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// Classifier did not answer in time
    #[error("classification timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Classifier backend failed
    #[error("classifier '{classifier}' failed: {message}")]
    Backend { classifier: String, message: String },
}

/// Task store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Store file exists but is not a valid task list
    #[error("task store at {path} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// Task id already present
    #[error("task already exists: {0}")]
    DuplicateId(String),

    /// Write failed
    #[error("failed to write task store at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_convert_with_context() {
        fn insert_twice() -> Result<()> {
            Err(StorageError::DuplicateId("task-1".into()).into())
        }
        let err = insert_twice().unwrap_err();
        assert!(matches!(err, CoreError::Storage(StorageError::DuplicateId(_))));
        assert_eq!(err.to_string(), "Storage error: task already exists: task-1");
    }

    #[test]
    fn config_errors_convert_with_context() {
        let err = CoreError::from(ConfigError::UnknownKey("plot.nope".into()));
        assert!(err.to_string().starts_with("Configuration error: "));
        assert!(err.to_string().contains("plot.nope"));
    }
}
