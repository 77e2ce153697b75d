//! # Validation Module
//!
//! Argument validation for the order workflow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Worker config                                                │
//! │  └── customer ids parsed as integers                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Workflow entry points (THIS MODULE)                          │
//! │  ├── customer_id > 0, checked before any collaborator call             │
//! │  └── pre-discount totals >= 0                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (quantity > 0)                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates that an entity id is strictly positive.
///
/// ## Example
/// ```rust
/// use orderdesk_core::validation::validate_id;
///
/// assert!(validate_id("customer_id", 1).is_ok());
/// assert!(validate_id("customer_id", 0).is_err());
/// assert!(validate_id("customer_id", -5).is_err());
/// ```
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates that an amount is zero or greater.
pub fn validate_non_negative_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an order line quantity.
///
/// ## Rules
/// - Must be positive
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("customer_id", 1).is_ok());
        assert!(validate_id("customer_id", i64::MAX).is_ok());

        let err = validate_id("customer_id", 0).unwrap_err();
        assert_eq!(err.field(), "customer_id");
        assert!(matches!(err, ValidationError::MustBePositive { .. }));
    }

    #[test]
    fn test_validate_non_negative_amount() {
        assert!(validate_non_negative_amount("total_amount", Money::zero()).is_ok());
        assert!(validate_non_negative_amount("total_amount", Money::new(dec!(0.01))).is_ok());

        let err = validate_non_negative_amount("total_amount", Money::new(dec!(-0.01)))
            .unwrap_err();
        assert_eq!(err.to_string(), "total_amount cannot be negative");
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }
}
