//! # Worker Errors
//!
//! Failures of the host process itself. Per-customer processing failures
//! are not errors here: the batch run logs them and moves on.

use thiserror::Error;

/// Errors raised while configuring or starting the worker.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Configuration is present but invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed.
    #[error("Failed to load configuration: {0}")]
    ConfigLoadFailed(String),

    /// The database never became reachable.
    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(#[from] orderdesk_db::DbError),

    /// A report line could not be produced or written.
    #[error("Failed to write report: {0}")]
    ReportFailed(String),
}

impl From<std::io::Error> for WorkerError {
    fn from(err: std::io::Error) -> Self {
        WorkerError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for WorkerError {
    fn from(err: toml::de::Error) -> Self {
        WorkerError::ConfigLoadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for WorkerError {
    fn from(err: serde_json::Error) -> Self {
        WorkerError::ReportFailed(err.to_string())
    }
}

/// Result type for worker operations.
pub type WorkerResult<T> = Result<T, WorkerError>;
