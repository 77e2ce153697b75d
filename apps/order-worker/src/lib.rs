//! # order-worker
//!
//! Host process for the order workflow: configuration, database startup
//! and the batch run over configured customers.
//!
//! ## Module Organization
//! - [`config`] - `WorkerConfig` loading (TOML + `ORDERDESK_*` env)
//! - [`worker`] - Batch run and report lines
//! - [`error`] - Worker error type

pub mod config;
pub mod error;
pub mod worker;

pub use config::{ReportFormat, WorkerConfig};
pub use error::{WorkerError, WorkerResult};
pub use worker::{report_line, run, RunSummary};

use std::sync::Arc;

use backoff::ExponentialBackoff;
use orderdesk_core::DiscountCalculator;
use orderdesk_db::migrations::migration_status;
use orderdesk_db::{Database, DbConfig, DbError};
use orderdesk_processing::OrderProcessor;
use tracing::{info, warn};

use crate::config::RetrySettings;

fn classify(e: DbError) -> backoff::Error<DbError> {
    if e.is_retryable() {
        warn!(error = %e, "Database connection failed, retrying");
        backoff::Error::transient(e)
    } else {
        backoff::Error::permanent(e)
    }
}

/// Opens the database, retrying connection failures with exponential backoff.
///
/// A pool that connects but fails its health check counts as a connection
/// failure. Errors that are not retryable (migrations, bad data) fail
/// immediately.
pub async fn connect_with_retry(db_config: DbConfig, retry: &RetrySettings) -> WorkerResult<Database> {
    let policy = ExponentialBackoff {
        initial_interval: retry.initial_backoff(),
        max_interval: retry.max_backoff(),
        max_elapsed_time: Some(retry.max_elapsed()),
        ..Default::default()
    };

    let db = backoff::future::retry(policy, || {
        let config = db_config.clone();
        async move {
            let db = Database::new(config).await.map_err(classify)?;
            if !db.health_check().await {
                return Err(classify(DbError::ConnectionFailed(
                    "health check query failed".into(),
                )));
            }
            Ok(db)
        }
    })
    .await?;

    let (total, applied) = migration_status(db.pool()).await?;
    info!(migrations_total = total, migrations_applied = applied, "Database ready");
    Ok(db)
}

/// Wires the SQLite repositories and the default discount policy.
pub fn build_processor(db: &Database) -> OrderProcessor {
    OrderProcessor::new(
        Arc::new(db.customers()),
        Arc::new(db.orders()),
        Arc::new(db.inventory()),
        Arc::new(DiscountCalculator::new()),
    )
}
