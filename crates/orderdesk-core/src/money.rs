//! # Money Module
//!
//! Provides the `Money` type for handling monetary values exactly.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Percent discounts make it worse:                                       │
//! │    10.99 × 5% = 0.5495 → drift accumulates across line items            │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal (rust_decimal, 96-bit mantissa)          │
//! │    10.99 × 5 / 100 = 0.5495 exactly, kept exact until display           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orderdesk_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let price = Money::new(dec!(10.99));
//!
//! let line_total = price.multiply_quantity(3)?;       // 32.97
//! let discount = line_total.percentage(dec!(10))?;    // 3.297
//! assert_eq!(line_total.checked_sub(discount)?.amount(), dec!(29.673));
//! # Ok::<(), orderdesk_core::CoreError>(())
//! ```
//!
//! ## Overflow
//! Every operation is checked. A result beyond the 96-bit mantissa is
//! returned as [`CoreError::AmountOverflow`] instead of panicking.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::TaxRate;

/// Number of decimal places used when money is presented.
pub const DISPLAY_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the store currency.
///
/// ## Design Decisions
/// - **Decimal (signed)**: exact base-10 values, negatives allowed for refunds
/// - **Single field tuple struct**: zero-cost wrapper
/// - **No implicit rounding**: arithmetic stays exact, only `Display` and
///   [`Money::rounded`] round
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  OrderItem.unit_price × quantity ──► OrderItem.subtotal()               │
/// │                                          │                              │
/// │                                          ▼                              │
/// │                              Σ subtotals (pre-discount)                 │
/// │                                          │                              │
/// │                 percentage(discount %) ──┤                              │
/// │                                          ▼                              │
/// │        Order.discount_amount    Order.total_amount = Σ − discount       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from an integer mantissa and a scale.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Money::from_scaled(1099, 2); // 10.99
    /// assert_eq!(price.amount(), dec!(10.99));
    /// ```
    #[inline]
    pub fn from_scaled(mantissa: i64, scale: u32) -> Self {
        Money(Decimal::new(mantissa, scale))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let unit_price = Money::new(dec!(2.99));
    /// assert_eq!(unit_price.multiply_quantity(3).unwrap().amount(), dec!(8.97));
    /// ```
    pub fn multiply_quantity(&self, qty: i64) -> CoreResult<Self> {
        self.0
            .checked_mul(Decimal::from(qty))
            .map(Money)
            .ok_or(CoreError::AmountOverflow("multiply_quantity"))
    }

    /// Adds two amounts.
    pub fn checked_add(&self, other: Money) -> CoreResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(CoreError::AmountOverflow("add"))
    }

    /// Subtracts `other` from this amount.
    pub fn checked_sub(&self, other: Money) -> CoreResult<Self> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or(CoreError::AmountOverflow("sub"))
    }

    /// Returns `percent` percent of this amount, exactly.
    ///
    /// `percent` is a percentage (10 = 10%), not a fraction.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let subtotal = Money::new(dec!(10.99));
    /// assert_eq!(subtotal.percentage(dec!(5)).unwrap().amount(), dec!(0.5495));
    /// ```
    pub fn percentage(&self, percent: Decimal) -> CoreResult<Money> {
        self.0
            .checked_mul(percent)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .map(Money)
            .ok_or(CoreError::AmountOverflow("percentage"))
    }

    /// Calculates tax at the given rate, exactly.
    pub fn calculate_tax(&self, rate: TaxRate) -> CoreResult<Money> {
        self.0
            .checked_mul(rate.as_fraction())
            .map(Money)
            .ok_or(CoreError::AmountOverflow("calculate_tax"))
    }

    /// Rounds to two decimal places using Bankers Rounding (half to even).
    ///
    /// ## Bankers Rounding
    /// ```text
    /// 0.125 → 0.12   0.135 → 0.14   0.5495 → 0.55
    /// Ties go to the even neighbour, so rounding bias cancels out over
    /// many orders.
    /// ```
    pub fn rounded(&self) -> Money {
        let mut value = self
            .0
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointNearestEven);
        value.rescale(DISPLAY_SCALE);
        Money(value)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money rounded to two decimal places (`100.00`, `-5.50`).
///
/// ## Note
/// Display is for logs and audit messages; stored values are never rounded.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded().0)
    }
}

impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money).map_err(|e| {
            ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
