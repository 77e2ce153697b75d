//! # Order Processor
//!
//! Moves every pending order of one customer to `Ready` or `OnHold`.
//!
//! ## Per-Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = Σ quantity × unit_price                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  percent = DiscountPolicy(customer, subtotal)                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  order.apply_discount ──► update_order (status Processed)               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  every item in stock? ──yes──► decrement stock per item                 │
//! │        │                       update_order_status(Ready)               │
//! │        │                       add_order_log("Order completed ...")     │
//! │        no                                                               │
//! │        └──────────────────────► update_order_status(OnHold)             │
//! │                                add_order_log("Order on hold ...")       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders are handled one after another. The first collaborator failure
//! aborts the batch; updates already persisted for earlier orders stay.

use std::sync::Arc;

use orderdesk_core::validation::validate_id;
use orderdesk_core::{
    Customer, CustomerRepository, DiscountPolicy, InventoryRepository, Money, Order,
    OrderRepository, OrderStatus, ORDER_ON_HOLD_LOG,
};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::error::{ProcessError, ProcessResult};

/// Audit line written when an order becomes `Ready`.
///
/// ```rust
/// use orderdesk_core::Money;
/// use orderdesk_processing::order_completed_log;
/// use rust_decimal_macros::dec;
///
/// let line = order_completed_log(dec!(15), Money::new(dec!(1275.00)));
/// assert_eq!(line, "Order completed with 15% discount. Total amount: 1275.00");
/// ```
pub fn order_completed_log(discount_percent: Decimal, total_amount: Money) -> String {
    format!(
        "Order completed with {}% discount. Total amount: {}",
        discount_percent.normalize(),
        total_amount
    )
}

/// Runs the pending-order workflow for a customer.
///
/// Collaborators are injected at construction and shared via `Arc`, so one
/// processor can be reused across customers.
pub struct OrderProcessor {
    customers: Arc<dyn CustomerRepository>,
    orders: Arc<dyn OrderRepository>,
    inventory: Arc<dyn InventoryRepository>,
    discounts: Arc<dyn DiscountPolicy>,
}

impl OrderProcessor {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        orders: Arc<dyn OrderRepository>,
        inventory: Arc<dyn InventoryRepository>,
        discounts: Arc<dyn DiscountPolicy>,
    ) -> Self {
        OrderProcessor {
            customers,
            orders,
            inventory,
            discounts,
        }
    }

    /// Processes all pending orders of `customer_id` in the order the
    /// collaborator returned them.
    ///
    /// ## Errors
    /// - [`ProcessError::InvalidArgument`] when `customer_id <= 0` (nothing is called)
    /// - [`ProcessError::CustomerNotFound`] when the customer lookup is empty
    /// - [`ProcessError::Repository`] on the first collaborator failure
    /// - [`ProcessError::InvalidArgument`] if the policy rejects a subtotal
    /// - [`ProcessError::Domain`] when an order's amounts overflow
    pub async fn process_customer_orders(&self, customer_id: i64) -> ProcessResult<Vec<Order>> {
        info!(customer_id, "Starting to process orders for customer");

        if let Err(e) = validate_id("customer_id", customer_id) {
            error!(customer_id, "Invalid customer id");
            return Err(e.into());
        }

        let customer = match self.customers.get_customer_by_id(customer_id).await? {
            Some(customer) => customer,
            None => {
                error!(customer_id, "Customer not found");
                return Err(ProcessError::CustomerNotFound(customer_id));
            }
        };

        info!(
            customer_id,
            name = %customer.name,
            is_vip = customer.is_vip,
            "Customer found"
        );

        let pending = self
            .orders
            .get_pending_orders_by_customer_id(customer_id)
            .await?;
        info!(customer_id, count = pending.len(), "Pending orders found");

        let mut processed = Vec::with_capacity(pending.len());
        for mut order in pending {
            self.process_order(&customer, &mut order).await?;
            processed.push(order);
        }

        info!(
            customer_id,
            count = processed.len(),
            "Finished processing orders for customer"
        );
        Ok(processed)
    }

    async fn process_order(&self, customer: &Customer, order: &mut Order) -> ProcessResult<()> {
        info!(order_id = order.id, "Processing order");

        let subtotal = order.items_subtotal()?;
        debug!(order_id = order.id, subtotal = %subtotal, "Order raw total");

        let percent = self
            .discounts
            .calculate_discount_percentage(customer, subtotal)?;
        order.apply_discount(subtotal, percent)?;

        debug!(
            order_id = order.id,
            discount_percent = %order.discount_percent,
            total_amount = %order.total_amount,
            "Discount applied"
        );

        self.orders.update_order(order).await?;
        debug!(order_id = order.id, "Order updated");

        if self.reserve_inventory(order).await? {
            order.status = OrderStatus::Ready;
            self.orders
                .update_order_status(order.id, OrderStatus::Ready)
                .await?;

            let message = order_completed_log(order.discount_percent, order.total_amount);
            self.orders.add_order_log(order.id, &message).await?;
            info!(order_id = order.id, "Order ready");
        } else {
            order.status = OrderStatus::OnHold;
            self.orders
                .update_order_status(order.id, OrderStatus::OnHold)
                .await?;

            self.orders.add_order_log(order.id, ORDER_ON_HOLD_LOG).await?;
            warn!(order_id = order.id, "Order on hold");
        }

        Ok(())
    }

    /// Checks every item against stock, then decrements all of them.
    ///
    /// Returns `false` at the first item that is missing from inventory or
    /// short; nothing is decremented in that case.
    async fn reserve_inventory(&self, order: &Order) -> ProcessResult<bool> {
        for item in &order.items {
            let stock = self
                .inventory
                .get_stock_quantity_by_product_id(item.product_id)
                .await?;

            match stock {
                Some(available) if available >= item.quantity => {}
                _ => {
                    warn!(
                        product_id = item.product_id,
                        requested = item.quantity,
                        available = ?stock,
                        "Insufficient inventory"
                    );
                    return Ok(false);
                }
            }
        }

        for item in &order.items {
            self.inventory
                .update_stock_quantity(item.product_id, item.quantity)
                .await?;
            debug!(
                product_id = item.product_id,
                quantity = item.quantity,
                "Inventory decremented"
            );
        }

        Ok(true)
    }
}
