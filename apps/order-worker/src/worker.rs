//! # Batch Run
//!
//! Processes the configured customers one after another and writes one
//! report line per processed order.
//!
//! ```text
//! for customer_id in customer_ids
//!     process_customer_orders(customer_id)
//!       Ok(orders)  → report each order, count Ready / OnHold
//!       Err(e)      → log, count failure, continue with next customer
//! ```

use std::io::Write;

use orderdesk_core::{Order, OrderStatus};
use orderdesk_processing::OrderProcessor;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};

use crate::config::ReportFormat;
use crate::error::{WorkerError, WorkerResult};

/// Counters for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub customers_processed: usize,
    pub customers_failed: usize,
    pub orders_ready: usize,
    pub orders_on_hold: usize,
}

/// JSON shape of a report line.
#[derive(Debug, Serialize)]
struct OrderReport {
    order_id: i64,
    customer_id: i64,
    status: &'static str,
    total_amount: String,
    discount_percent: Decimal,
}

/// Formats the report line for one processed order.
pub fn report_line(order: &Order, format: ReportFormat) -> WorkerResult<String> {
    match format {
        ReportFormat::Log => Ok(format!(
            "Order {} Status: {}, Total Amount: {}, Discount: {}%",
            order.id,
            order.status,
            order.total_amount,
            order.discount_percent.normalize()
        )),
        ReportFormat::Json => {
            let report = OrderReport {
                order_id: order.id,
                customer_id: order.customer_id,
                status: order.status.as_str(),
                total_amount: order.total_amount.to_string(),
                discount_percent: order.discount_percent.normalize(),
            };
            Ok(serde_json::to_string(&report)?)
        }
    }
}

/// Runs the workflow for every customer and writes report lines to `out`.
///
/// A failing customer never stops the batch; only a failed write does.
pub async fn run<W: Write>(
    processor: &OrderProcessor,
    customer_ids: &[i64],
    format: ReportFormat,
    out: &mut W,
) -> WorkerResult<RunSummary> {
    let mut summary = RunSummary::default();

    for &customer_id in customer_ids {
        let orders = match processor.process_customer_orders(customer_id).await {
            Ok(orders) => orders,
            Err(e) => {
                error!(customer_id, error = %e, "Processing failed for customer");
                summary.customers_failed += 1;
                continue;
            }
        };

        summary.customers_processed += 1;
        info!(customer_id, orders = orders.len(), "Customer processed");

        for order in &orders {
            match order.status {
                OrderStatus::Ready => summary.orders_ready += 1,
                OrderStatus::OnHold => summary.orders_on_hold += 1,
                _ => {}
            }

            let line = report_line(order, format)?;
            writeln!(out, "{line}").map_err(|e| WorkerError::ReportFailed(e.to_string()))?;
        }
    }

    info!(
        processed = summary.customers_processed,
        failed = summary.customers_failed,
        ready = summary.orders_ready,
        on_hold = summary.orders_on_hold,
        "Batch run finished"
    );

    Ok(summary)
}
