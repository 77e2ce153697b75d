//! # order-worker
//!
//! ## Usage
//! ```bash
//! # Uses ~/.config/orderdesk/worker.toml if present
//! cargo run -p order-worker
//!
//! # Explicit config file
//! cargo run -p order-worker -- --config ./worker.toml
//!
//! # Demo run against a fresh database
//! ORDERDESK_SEED_DEMO=1 ORDERDESK_CUSTOMER_IDS=1,2,3 cargo run -p order-worker
//! ```
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show discount and inventory diagnostics
//! - Default: INFO level

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use order_worker::{build_processor, connect_with_retry, run, WorkerConfig, WorkerResult};
use orderdesk_db::{mask_connection_string, seed_demo_data, DbConfig};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn config_path_from_args() -> Option<PathBuf> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--config" || a == "-c")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

async fn start() -> WorkerResult<bool> {
    let config = WorkerConfig::load(config_path_from_args())?;

    let db_config = DbConfig::new(&config.database.path);
    info!(
        database = %mask_connection_string(&db_config.connect_url()),
        customers = config.processing.customer_ids.len(),
        report_format = %config.processing.report_format,
        "Starting order worker"
    );

    let db = connect_with_retry(db_config, &config.retry).await?;

    if config.database.seed_demo_data {
        if let Some(summary) = seed_demo_data(&db).await? {
            info!(orders = summary.orders, "Demo data inserted");
        }
    }

    if config.processing.customer_ids.is_empty() {
        warn!("No customer ids configured, nothing to do");
    }

    let processor = build_processor(&db);
    let stdout = std::io::stdout();
    let summary = run(
        &processor,
        &config.processing.customer_ids,
        config.processing.report_format,
        &mut stdout.lock(),
    )
    .await?;

    db.close().await;

    Ok(summary.customers_failed == 0)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match start().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            warn!("Some customers could not be processed");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "Order worker failed");
            ExitCode::FAILURE
        }
    }
}
