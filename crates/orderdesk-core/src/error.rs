//! # Error Types
//!
//! Domain-specific error types for orderdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderdesk-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Invalid arguments                              │
//! │                                                                         │
//! │  orderdesk-core ports                                                  │
//! │  └── RepositoryError  - Collaborator (storage) failures                │
//! │                                                                         │
//! │  orderdesk-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  orderdesk-processing errors                                           │
//! │  └── ProcessError     - What callers of the workflow see               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ProcessError → worker log         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A status tag that is not one of the known order states.
    ///
    /// ## When This Occurs
    /// - A stored row carries a status written by another system
    /// - Case differs ("pending" is not "Pending")
    #[error("Unknown order status: '{0}'")]
    UnknownOrderStatus(String),

    /// An amount left the representable decimal range.
    ///
    /// ## When This Occurs
    /// - A stored quantity or unit price large enough that the line
    ///   subtotal or order total cannot be represented
    #[error("Amount overflow in {0}")]
    AmountOverflow(&'static str),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true when the error is a caller-side argument problem.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors are raised before any collaborator is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparsable decimal, bad date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending parameter.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::MustNotBeNegative { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "customer_id".to_string(),
        };
        assert_eq!(err.to_string(), "customer_id must be positive");

        let err = ValidationError::MustNotBeNegative {
            field: "total_amount".to_string(),
        };
        assert_eq!(err.to_string(), "total_amount cannot be negative");
    }

    #[test]
    fn test_validation_error_field() {
        let err = ValidationError::OutOfRange {
            field: "discount_percent".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.field(), "discount_percent");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(core_err.is_invalid_argument());
        assert!(!CoreError::UnknownOrderStatus("Shipped".into()).is_invalid_argument());
    }
}
