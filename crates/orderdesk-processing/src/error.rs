//! # Processing Errors
//!
//! What callers of [`crate::OrderProcessor`] see when a batch fails.
//!
//! ```text
//! ValidationError ──────────────┐
//! CoreError::Validation ────────┼──► ProcessError::InvalidArgument
//! CoreError (other) ────────────┼──► ProcessError::Domain
//! RepositoryError ──────────────┼──► ProcessError::Repository
//! customer lookup returned None ┴──► ProcessError::CustomerNotFound
//! ```

use orderdesk_core::{CoreError, RepositoryError, ValidationError};
use thiserror::Error;

/// Errors raised by the order workflow.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// A caller-supplied argument was rejected before any collaborator call.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The customer lookup returned nothing.
    #[error("Customer with ID {0} not found")]
    CustomerNotFound(i64),

    /// A domain rule failed for a reason other than argument validation.
    #[error("Domain error: {0}")]
    Domain(CoreError),

    /// A collaborator failed; the batch was aborted at that point.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ProcessError {
    /// True for argument problems (the caller should fix its input).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ProcessError::InvalidArgument(_))
    }

    /// True when the requested customer does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProcessError::CustomerNotFound(_))
    }
}

impl From<CoreError> for ProcessError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(inner) => ProcessError::InvalidArgument(inner),
            other => ProcessError::Domain(other),
        }
    }
}

/// Result type for workflow operations.
pub type ProcessResult<T> = Result<T, ProcessError>;
