//! # Domain Types
//!
//! Core domain types used throughout Order Desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │      Order      │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  customer_id    │◄──│  order_id (FK)  │       │
//! │  │  is_vip         │   │  status         │   │  product_id     │       │
//! │  │  registration   │   │  total_amount   │   │  quantity       │       │
//! │  └─────────────────┘   │  discount_%/amt │   │  unit_price     │       │
//! │                        └─────────────────┘   └────────┬────────┘       │
//! │                                                       │ snapshot        │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌────────▼────────┐       │
//! │  │  OrderStatus    │   │    OrderLog     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Pending        │   │  order_id       │   │  name           │       │
//! │  │  Processed      │   │  log_date       │   │  category       │       │
//! │  │  Ready / OnHold │   │  message        │   │  price          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Order Lifecycle
//! ```text
//! Pending ──► Processed (in memory) ──┬──► Ready   (stock decremented)
//!                                     └──► OnHold  (stock untouched)
//! ```

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2000 bps = 20% (the default VAT rate used for price display)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Default rate applied by [`Product::price_with_tax`] callers (20%).
    pub const DEFAULT: TaxRate = TaxRate(2000);

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from whole percent (20 → 20%).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        TaxRate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (2000 bps → 0.2000).
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::DEFAULT
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer whose pending orders are processed. Read-only for the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Flat VIP discount eligibility.
    pub is_vip: bool,
    /// Calendar date of registration (no time-of-day semantics).
    pub registration_date: NaiveDate,
}

impl Customer {
    /// Creates a customer.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        is_vip: bool,
        registration_date: NaiveDate,
    ) -> Self {
        Customer {
            id,
            name: name.into(),
            email: email.into(),
            is_vip,
            registration_date,
        }
    }

    /// Calendar-year difference between `today` and the registration year.
    ///
    /// Informational only. The discount policy measures loyalty in whole
    /// days instead (see [`crate::discount`]).
    pub fn years_as_customer(&self, today: NaiveDate) -> i32 {
        today.year() - self.registration_date.year()
    }

    /// Whole days elapsed since registration (negative if registered in the future).
    pub fn days_since_registration(&self, today: NaiveDate) -> i64 {
        (today - self.registration_date).num_days()
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer {}: {} ({})", self.id, self.name, self.email)
    }
}

// =============================================================================
// Product
// =============================================================================

/// Product reference data, attached to order items as a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: Money,
}

impl Product {
    /// Price including tax at `rate`.
    ///
    /// ## Example
    /// ```rust
    /// use orderdesk_core::{Money, Product, TaxRate};
    /// use rust_decimal_macros::dec;
    ///
    /// let product = Product {
    ///     id: 1,
    ///     name: "Desk Lamp".into(),
    ///     category: "Lighting".into(),
    ///     price: Money::new(dec!(10.00)),
    /// };
    /// assert_eq!(product.price_with_tax(TaxRate::DEFAULT).unwrap().amount(), dec!(12.00));
    /// ```
    pub fn price_with_tax(&self, rate: TaxRate) -> CoreResult<Money> {
        self.price.checked_add(self.price.calculate_tax(rate)?)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product {}: {} ({}) - {}",
            self.id, self.name, self.category, self.price
        )
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// Stored as the exact tags `"Pending"`, `"Processed"`, `"Ready"`, `"OnHold"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum OrderStatus {
    /// Waiting to be processed.
    Pending,
    /// Discount applied; only ever observed in memory during processing.
    Processed,
    /// All items reserved from stock.
    Ready,
    /// At least one item lacked stock; inventory untouched.
    OnHold,
}

impl OrderStatus {
    /// Returns the stored tag for this status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processed => "Processed",
            OrderStatus::Ready => "Ready",
            OrderStatus::OnHold => "OnHold",
        }
    }

    /// True for the statuses a processed order ends in.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Ready | OrderStatus::OnHold)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    /// Case-sensitive: `"pending"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Processed" => Ok(OrderStatus::Processed),
            "Ready" => Ok(OrderStatus::Ready),
            "OnHold" => Ok(OrderStatus::OnHold),
            other => Err(CoreError::UnknownOrderStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    /// Requested quantity (positive).
    pub quantity: i64,
    /// Unit price frozen on the order.
    pub unit_price: Money,
    /// Product details, when the catalogue still knows the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl OrderItem {
    /// Line subtotal (quantity × unit price).
    pub fn subtotal(&self) -> CoreResult<Money> {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrderItem {}: {}x Product {} at {} each",
            self.id, self.quantity, self.product_id, self.unit_price
        )
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order with its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub order_date: DateTime<Utc>,
    /// Amount after discount once processed.
    pub total_amount: Money,
    /// Applied discount in percent (0-100).
    pub discount_percent: Decimal,
    pub discount_amount: Money,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Pre-discount total: Σ quantity × unit price over all items.
    pub fn items_subtotal(&self) -> CoreResult<Money> {
        self.items
            .iter()
            .try_fold(Money::zero(), |acc, item| acc.checked_add(item.subtotal()?))
    }

    /// Applies a discount to `subtotal` and marks the order `Processed`.
    ///
    /// Discount amount and total are always recomputed together:
    /// ```text
    /// discount_amount = subtotal × percent / 100
    /// total_amount    = subtotal − discount_amount
    /// ```
    ///
    /// On overflow the order is left untouched.
    pub fn apply_discount(&mut self, subtotal: Money, percent: Decimal) -> CoreResult<()> {
        let discount_amount = subtotal.percentage(percent)?;
        let total_amount = subtotal.checked_sub(discount_amount)?;

        self.discount_percent = percent;
        self.discount_amount = discount_amount;
        self.total_amount = total_amount;
        self.status = OrderStatus::Processed;
        Ok(())
    }

    /// True when the order can be shipped.
    pub fn is_ready_for_shipping(&self) -> bool {
        self.status == OrderStatus::Ready
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order {}: Customer {}, Status: {}, Total: {}",
            self.id, self.customer_id, self.status, self.total_amount
        )
    }
}

// =============================================================================
// Order Log
// =============================================================================

/// An audit entry appended to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLog {
    pub id: i64,
    pub order_id: i64,
    pub log_date: DateTime<Utc>,
    pub message: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
