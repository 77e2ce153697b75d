//! # orderdesk-processing: The Order Workflow
//!
//! Takes a customer id, loads the customer's pending orders and drives each
//! one through discount, inventory reservation and a terminal status.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apps/order-worker                                                      │
//! │       │ process_customer_orders(customer_id)                            │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            orderdesk-processing (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   OrderProcessor ──► DiscountPolicy (orderdesk-core)            │   │
//! │  │        │                                                        │   │
//! │  │        └──► CustomerRepository / OrderRepository /              │   │
//! │  │             InventoryRepository  (ports, orderdesk-core)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       ▲                                                                 │
//! │  orderdesk-db (SQLite) or in-memory fakes implement the ports          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orderdesk_core::DiscountCalculator;
//! use orderdesk_processing::OrderProcessor;
//!
//! let processor = OrderProcessor::new(
//!     Arc::new(db.customers()),
//!     Arc::new(db.orders()),
//!     Arc::new(db.inventory()),
//!     Arc::new(DiscountCalculator::new()),
//! );
//!
//! for order in processor.process_customer_orders(1).await? {
//!     println!("{order}");
//! }
//! ```

pub mod error;
pub mod processor;

pub use error::{ProcessError, ProcessResult};
pub use processor::{order_completed_log, OrderProcessor};
