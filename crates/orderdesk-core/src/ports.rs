//! # Collaborator Ports
//!
//! Narrow storage contracts the order workflow depends on.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────────────────┐
//! │   OrderProcessor     │──────► │ CustomerRepository               │
//! │ (orderdesk-          │──────► │ OrderRepository                  │
//! │  processing)         │──────► │ InventoryRepository              │
//! └──────────────────────┘        └───────────────┬──────────────────┘
//!                                                 │ implemented by
//!                                 ┌───────────────▼──────────────────┐
//!                                 │ orderdesk-db (SQLite)            │
//!                                 │ test fakes (in-memory)           │
//!                                 └──────────────────────────────────┘
//! ```
//!
//! Every method is async and returns [`RepositoryResult`]. Implementations
//! decide how to store data; the workflow only sees domain types.

use async_trait::async_trait;
use std::error::Error as StdError;
use thiserror::Error;

use crate::types::{Customer, Order, OrderItem, OrderStatus, Product};

// =============================================================================
// Repository Error
// =============================================================================

/// A collaborator failed to complete an operation.
///
/// The workflow never inspects the cause; it propagates it as-is.
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct RepositoryError {
    /// The port method that failed (e.g. `"update_order_status"`).
    pub operation: &'static str,
    #[source]
    pub source: Box<dyn StdError + Send + Sync + 'static>,
}

impl RepositoryError {
    /// Wraps any error raised by a collaborator.
    pub fn new<E>(operation: &'static str, source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        RepositoryError {
            operation,
            source: source.into(),
        }
    }
}

/// Result type for port methods.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

// =============================================================================
// Traits
// =============================================================================

/// Customer lookup.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Returns `None` when no customer has this id.
    async fn get_customer_by_id(&self, customer_id: i64) -> RepositoryResult<Option<Customer>>;
}

/// Order reads, full and partial updates, and the audit log.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Orders of `customer_id` whose status is exactly `Pending`, with items loaded.
    async fn get_pending_orders_by_customer_id(
        &self,
        customer_id: i64,
    ) -> RepositoryResult<Vec<Order>>;

    /// Items of an order; each carries its product snapshot when the product exists.
    async fn get_order_items_by_order_id(&self, order_id: i64)
        -> RepositoryResult<Vec<OrderItem>>;

    async fn get_order_by_id(&self, order_id: i64) -> RepositoryResult<Option<Order>>;

    /// Persists the order's scalar fields (status, amounts, discount).
    async fn update_order(&self, order: &Order) -> RepositoryResult<()>;

    async fn update_order_status(&self, order_id: i64, status: OrderStatus)
        -> RepositoryResult<()>;

    /// Appends an audit line; the collaborator stamps the current time.
    async fn add_order_log(&self, order_id: i64, message: &str) -> RepositoryResult<()>;
}

/// Product catalogue lookup.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_product_by_id(&self, product_id: i64) -> RepositoryResult<Option<Product>>;
}

/// Stock levels per product.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// `None` when the product has no inventory record.
    async fn get_stock_quantity_by_product_id(
        &self,
        product_id: i64,
    ) -> RepositoryResult<Option<i64>>;

    /// Subtracts `quantity` from the product's stock.
    async fn update_stock_quantity(&self, product_id: i64, quantity: i64)
        -> RepositoryResult<()>;
}
