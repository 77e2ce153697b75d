//! # Repository Module
//!
//! SQLite implementations of the orderdesk-core ports.
//!
//! ## Two Layers Per Repository
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderProcessor                                                         │
//! │       │  Arc<dyn OrderRepository>  (port, RepositoryResult)             │
//! │       ▼                                                                 │
//! │  impl OrderRepository for SqliteOrderRepository                         │
//! │       │  DbError → RepositoryError tagged with the port method          │
//! │       ▼                                                                 │
//! │  SqliteOrderRepository inherent methods  (DbResult)                     │
//! │  ├── get_pending_by_customer / get_items / get_by_id                    │
//! │  ├── update / update_status / add_log / get_logs                        │
//! │  └── insert (seed + tests)                                              │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts live in TEXT columns and are parsed back with [`parse_decimal`].

pub mod customer;
pub mod inventory;
pub mod order;
pub mod product;

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{DbError, DbResult};

/// Parses a stored decimal string.
pub(crate) fn parse_decimal(column: &str, value: &str) -> DbResult<Decimal> {
    Decimal::from_str(value).map_err(|e| DbError::invalid_data(column, e))
}

/// Parses a nullable decimal column; NULL reads as zero.
pub(crate) fn parse_optional_decimal(column: &str, value: Option<&str>) -> DbResult<Decimal> {
    value
        .map(|v| parse_decimal(column, v))
        .transpose()
        .map(|d| d.unwrap_or(Decimal::ZERO))
}
