//! # orderdesk-db: Database Layer for Order Desk
//!
//! SQLite storage behind the collaborator ports of orderdesk-core, using
//! sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Order Desk Data Flow                             │
//! │                                                                         │
//! │  OrderProcessor (orderdesk-processing)                                 │
//! │       │  Arc<dyn CustomerRepository / OrderRepository / ...>           │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  orderdesk-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │  │   │
//! │  │   │               │    │ SqliteCustomer...  │  │            │  │   │
//! │  │   │ SqlitePool    │◄───│ SqliteOrder...     │  │ 001_init   │  │   │
//! │  │   │               │    │ SqliteProduct...   │  │            │  │   │
//! │  │   │               │    │ SqliteInventory... │  │            │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Port implementations
//! - [`mask`] - Credential masking for log output
//! - [`demo`] - Demo data set used by the `seed` binary
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orderdesk_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./orders.db")).await?;
//!
//! let pending = db.orders().get_pending_by_customer(1).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod demo;
pub mod error;
pub mod mask;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use demo::{seed_demo_data, SeedSummary};
pub use error::{DbError, DbResult};
pub use mask::mask_connection_string;
pub use pool::{Database, DbConfig};

pub use repository::customer::SqliteCustomerRepository;
pub use repository::inventory::SqliteInventoryRepository;
pub use repository::order::SqliteOrderRepository;
pub use repository::product::SqliteProductRepository;
