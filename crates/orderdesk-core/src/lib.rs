//! # orderdesk-core: Pure Business Logic for Order Desk
//!
//! This crate holds the domain model and the discount policy as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Desk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/order-worker (batch host)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           orderdesk-processing (OrderProcessor)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ports (traits)                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ orderdesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ discount  │  │   ports   │  │   │
//! │  │   │ Customer  │  │   Money   │  │  VIP +    │  │ Customer  │  │   │
//! │  │   │  Order    │  │ (decimal) │  │ loyalty + │  │  Order    │  │   │
//! │  │   │ OrderItem │  │           │  │  value    │  │ Inventory │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │           orderdesk-db (implements the ports on SQLite)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Order, OrderItem, Product, ...)
//! - [`money`] - Money type with exact decimal arithmetic (no floating point!)
//! - [`discount`] - Tiered discount policy
//! - [`ports`] - Collaborator contracts consumed by the order workflow
//! - [`error`] - Domain error types
//! - [`validation`] - Argument validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use orderdesk_core::discount::{DiscountCalculator, DiscountPolicy};
//! use orderdesk_core::money::Money;
//! use orderdesk_core::types::Customer;
//! use rust_decimal_macros::dec;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//! let customer = Customer::new(1, "Jane Smith", "jane@example.com", true, today);
//! let calculator = DiscountCalculator::with_reference_date(today);
//!
//! // VIP (10) + order value over 1,000 (5)
//! let percent = calculator
//!     .calculate_discount_percentage(&customer, Money::new(dec!(1500.00)))
//!     .unwrap();
//! assert_eq!(percent, dec!(15));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod money;
pub mod ports;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::{DiscountCalculator, DiscountPolicy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use ports::{
    CustomerRepository, InventoryRepository, OrderRepository, ProductRepository,
    RepositoryError, RepositoryResult,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound for any discount produced by the policy, in percent.
pub const MAX_DISCOUNT_PERCENT: rust_decimal::Decimal = rust_decimal_macros::dec!(25);

/// Audit message written when an order cannot be fulfilled from stock.
pub const ORDER_ON_HOLD_LOG: &str = "Order on hold. Some items are not on stock.";
