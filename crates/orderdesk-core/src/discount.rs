//! # Discount Policy
//!
//! Computes the capped discount percentage for a customer's order.
//!
//! ## How the Discount Is Built
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Discount Components                                │
//! │                                                                         │
//! │  VIP            is_vip                    → 10                          │
//! │                                                                         │
//! │  Loyalty        days since registration / 365                           │
//! │                 ≥ 5 years                 →  5                          │
//! │                 ≥ 2 years                 →  2                          │
//! │                                                                         │
//! │  Order value    pre-discount total (strictly greater than)              │
//! │                 > 10,000                  → 15                          │
//! │                 >  5,000                  → 10                          │
//! │                 >  1,000                  →  5                          │
//! │                                                                         │
//! │  Sum ──► min(sum, 25) ──► percentage (callers divide by 100)            │
//! │                                                                         │
//! │  Example: VIP, 6 years, 11,000 → 10 + 5 + 15 = 30 → capped at 25        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loyalty is measured in whole calendar days rather than by subtracting
//! calendar years, so leap years and time zones cannot shift a tier.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::Customer;
use crate::validation::validate_non_negative_amount;
use crate::MAX_DISCOUNT_PERCENT;

const VIP_DISCOUNT: Decimal = dec!(10);

const DAYS_PER_YEAR: i64 = 365;

/// (minimum whole years, discount)
const LOYALTY_TIERS: [(i64, Decimal); 2] = [(5, dec!(5)), (2, dec!(2))];

/// (exclusive lower bound, discount)
const ORDER_VALUE_TIERS: [(Decimal, Decimal); 3] = [
    (dec!(10000), dec!(15)),
    (dec!(5000), dec!(10)),
    (dec!(1000), dec!(5)),
];

// =============================================================================
// Policy Trait
// =============================================================================

/// Decides the discount percentage for an order.
///
/// The order workflow depends on this trait so tests can pin a percentage.
pub trait DiscountPolicy: Send + Sync {
    /// Returns the discount in percent (`25` means 25%) for a pre-discount
    /// `total_amount`.
    ///
    /// ## Errors
    /// `CoreError::Validation` when `total_amount` is negative.
    fn calculate_discount_percentage(
        &self,
        customer: &Customer,
        total_amount: Money,
    ) -> CoreResult<Decimal>;
}

// =============================================================================
// Calculator
// =============================================================================

/// The standard tiered discount policy.
///
/// ## Usage
/// ```rust
/// use chrono::NaiveDate;
/// use orderdesk_core::{Customer, DiscountCalculator, DiscountPolicy, Money};
/// use rust_decimal_macros::dec;
///
/// let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
/// let six_years_ago = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
/// let customer = Customer::new(1, "John Doe", "john@example.com", true, six_years_ago);
///
/// let calculator = DiscountCalculator::with_reference_date(today);
/// let percent = calculator
///     .calculate_discount_percentage(&customer, Money::new(dec!(11000)))
///     .unwrap();
/// assert_eq!(percent, dec!(25)); // 10 + 5 + 15 = 30, capped
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountCalculator {
    /// Fixed "today"; `None` means the current UTC date.
    reference_date: Option<NaiveDate>,
}

impl DiscountCalculator {
    /// Creates a calculator that measures loyalty against today's UTC date.
    pub fn new() -> Self {
        DiscountCalculator {
            reference_date: None,
        }
    }

    /// Creates a calculator that treats `today` as the current date.
    pub fn with_reference_date(today: NaiveDate) -> Self {
        DiscountCalculator {
            reference_date: Some(today),
        }
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Pure form of the policy with an explicit `today`.
    pub fn calculate_discount_percentage_on(
        &self,
        customer: &Customer,
        total_amount: Money,
        today: NaiveDate,
    ) -> CoreResult<Decimal> {
        validate_non_negative_amount("total_amount", total_amount)?;

        let vip = vip_discount(customer);
        let loyalty = loyalty_discount(customer, today);
        let order_value = order_value_discount(total_amount);

        let mut discount_percent = vip + loyalty + order_value;

        if discount_percent > MAX_DISCOUNT_PERCENT {
            debug!(
                max_discount = %MAX_DISCOUNT_PERCENT,
                original_discount = %discount_percent,
                "Discount capped"
            );
            discount_percent = MAX_DISCOUNT_PERCENT;
        }

        info!(
            customer_id = customer.id,
            discount_percent = %discount_percent,
            "Final discount calculated"
        );

        Ok(discount_percent)
    }
}

impl DiscountPolicy for DiscountCalculator {
    fn calculate_discount_percentage(
        &self,
        customer: &Customer,
        total_amount: Money,
    ) -> CoreResult<Decimal> {
        self.calculate_discount_percentage_on(customer, total_amount, self.today())
    }
}

// =============================================================================
// Components
// =============================================================================

fn vip_discount(customer: &Customer) -> Decimal {
    if customer.is_vip {
        VIP_DISCOUNT
    } else {
        Decimal::ZERO
    }
}

/// Whole years = whole days / 365; a registration in the future counts as 0.
fn loyalty_discount(customer: &Customer, today: NaiveDate) -> Decimal {
    let days = customer.days_since_registration(today);

    LOYALTY_TIERS
        .iter()
        .find(|(years, _)| days >= years * DAYS_PER_YEAR)
        .map(|(_, discount)| *discount)
        .unwrap_or(Decimal::ZERO)
}

fn order_value_discount(total_amount: Money) -> Decimal {
    let amount = total_amount.amount();

    ORDER_VALUE_TIERS
        .iter()
        .find(|(threshold, _)| amount > *threshold)
        .map(|(_, discount)| *discount)
        .unwrap_or(Decimal::ZERO)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use chrono::{Duration, Months};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn customer(is_vip: bool, registration_date: NaiveDate) -> Customer {
        Customer::new(42, "Test Customer", "test@example.com", is_vip, registration_date)
    }

    fn years_and_a_day_ago(years: u32) -> NaiveDate {
        today()
            .checked_sub_months(Months::new(years * 12))
            .unwrap()
            - Duration::days(1)
    }

    fn discount(customer: &Customer, amount: Decimal) -> Decimal {
        DiscountCalculator::with_reference_date(today())
            .calculate_discount_percentage(customer, Money::new(amount))
            .unwrap()
    }

    #[test]
    fn test_new_customer_small_order_gets_nothing() {
        let c = customer(false, today() - Duration::days(1));
        assert_eq!(discount(&c, dec!(500)), dec!(0));
    }

    #[test]
    fn test_vip_only() {
        let c = customer(true, today());
        assert_eq!(discount(&c, dec!(500)), dec!(10));
    }

    #[test]
    fn test_two_year_loyalty() {
        let c = customer(false, years_and_a_day_ago(2));
        assert_eq!(discount(&c, dec!(500)), dec!(2));
    }

    #[test]
    fn test_five_year_loyalty() {
        let c = customer(false, years_and_a_day_ago(5));
        assert_eq!(discount(&c, dec!(500)), dec!(5));
    }

    #[test]
    fn test_loyalty_uses_whole_days() {
        // 729 days is still under two 365-day years.
        let c = customer(false, today() - Duration::days(729));
        assert_eq!(discount(&c, dec!(0)), dec!(0));

        let c = customer(false, today() - Duration::days(730));
        assert_eq!(discount(&c, dec!(0)), dec!(2));
    }

    #[test]
    fn test_future_registration_counts_as_new() {
        let c = customer(false, today() + Duration::days(30));
        assert_eq!(discount(&c, dec!(0)), dec!(0));
    }

    #[test]
    fn test_order_value_boundaries_are_strict() {
        let c = customer(false, today());

        assert_eq!(discount(&c, dec!(1000)), dec!(0));
        assert_eq!(discount(&c, dec!(1001)), dec!(5));
        assert_eq!(discount(&c, dec!(1000.01)), dec!(5));
        assert_eq!(discount(&c, dec!(5000)), dec!(5));
        assert_eq!(discount(&c, dec!(5000.01)), dec!(10));
        assert_eq!(discount(&c, dec!(10000)), dec!(10));
        assert_eq!(discount(&c, dec!(10000.01)), dec!(15));
    }

    #[test]
    fn test_cap_at_maximum() {
        let c = customer(true, years_and_a_day_ago(6));
        // 10 + 5 + 15 = 30
        assert_eq!(discount(&c, dec!(11000)), dec!(25));
    }

    #[test]
    fn test_exactly_at_cap_is_not_clamped() {
        // VIP 10 + order value 15 = 25
        let c = customer(true, today());
        assert_eq!(discount(&c, dec!(10000.50)), dec!(25));
    }

    #[test]
    fn test_sum_below_cap_is_returned_as_is() {
        let c = customer(true, years_and_a_day_ago(2));
        // 10 + 2 + 10
        assert_eq!(discount(&c, dec!(6000)), dec!(22));
    }

    #[test]
    fn test_negative_amount_is_rejected_for_any_customer() {
        let calculator = DiscountCalculator::with_reference_date(today());
        for c in [customer(true, years_and_a_day_ago(10)), customer(false, today())] {
            let err = calculator
                .calculate_discount_percentage(&c, Money::new(dec!(-0.01)))
                .unwrap_err();
            assert!(err.is_invalid_argument());
            assert!(matches!(
                err,
                CoreError::Validation(ValidationError::MustNotBeNegative { ref field })
                    if field == "total_amount"
            ));
        }
    }

    #[test]
    fn test_result_always_within_bounds() {
        let calculator = DiscountCalculator::with_reference_date(today());
        for is_vip in [false, true] {
            for years in [0, 2, 5, 9] {
                for amount in [dec!(0), dec!(999), dec!(1500), dec!(7000), dec!(50000)] {
                    let c = customer(is_vip, years_and_a_day_ago(years));
                    let percent = calculator
                        .calculate_discount_percentage(&c, Money::new(amount))
                        .unwrap();
                    assert!(percent >= Decimal::ZERO && percent <= MAX_DISCOUNT_PERCENT);
                }
            }
        }
    }

    #[test]
    fn test_default_calculator_uses_current_date() {
        let c = customer(false, Utc::now().date_naive());
        let percent = DiscountCalculator::new()
            .calculate_discount_percentage(&c, Money::new(dec!(500)))
            .unwrap();
        assert_eq!(percent, dec!(0));
    }
}
