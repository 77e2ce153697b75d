//! # Order Repository
//!
//! Database operations for orders, order items and order logs.
//!
//! ## Order Lifecycle in the Database
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. INSERT          status 'Pending', items in order_items             │
//! │                                                                         │
//! │  2. FULL UPDATE     total_amount, discount_percent, discount_amount,   │
//! │                     status ('Processed')                               │
//! │                                                                         │
//! │  3. STATUS UPDATE   'Ready' or 'OnHold'                                │
//! │                                                                         │
//! │  4. LOG             order_logs row stamped with the current UTC time   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Item reads attach the product as a snapshot when the catalogue still has it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orderdesk_core::validation::validate_quantity;
use orderdesk_core::{
    Money, Order, OrderItem, OrderLog, OrderRepository, OrderStatus, RepositoryResult,
};
use sqlx::SqlitePool;
use tracing::debug;

use super::product::SqliteProductRepository;
use super::{parse_decimal, parse_optional_decimal};
use crate::error::{DbError, DbResult};

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    order_date: DateTime<Utc>,
    total_amount: String,
    discount_percent: Option<String>,
    discount_amount: Option<String>,
    status: String,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> DbResult<Order> {
        let status: OrderStatus = self
            .status
            .parse()
            .map_err(|e| DbError::invalid_data("orders.status", e))?;

        Ok(Order {
            id: self.id,
            customer_id: self.customer_id,
            order_date: self.order_date,
            total_amount: Money::new(parse_decimal("orders.total_amount", &self.total_amount)?),
            discount_percent: parse_optional_decimal(
                "orders.discount_percent",
                self.discount_percent.as_deref(),
            )?,
            discount_amount: Money::new(parse_optional_decimal(
                "orders.discount_amount",
                self.discount_amount.as_deref(),
            )?),
            status,
            items,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    product_id: i64,
    quantity: i64,
    unit_price: String,
}

impl OrderItemRow {
    fn into_item(self) -> DbResult<OrderItem> {
        validate_quantity(self.quantity)
            .map_err(|e| DbError::invalid_data("order_items.quantity", e))?;

        Ok(OrderItem {
            id: self.id,
            order_id: self.order_id,
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price: Money::new(parse_decimal("order_items.unit_price", &self.unit_price)?),
            product: None,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderLogRow {
    id: i64,
    order_id: i64,
    log_date: DateTime<Utc>,
    message: String,
}

impl From<OrderLogRow> for OrderLog {
    fn from(row: OrderLogRow) -> Self {
        OrderLog {
            id: row.id,
            order_id: row.order_id,
            log_date: row.log_date,
            message: row.message,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct SqliteOrderRepository {
    pool: SqlitePool,
    products: SqliteProductRepository,
}

impl SqliteOrderRepository {
    /// Creates a new SqliteOrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        let products = SqliteProductRepository::new(pool.clone());
        SqliteOrderRepository { pool, products }
    }

    /// Orders of a customer whose status is exactly `Pending`, items loaded.
    pub async fn get_pending_by_customer(&self, customer_id: i64) -> DbResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, customer_id, order_date, total_amount,
                   discount_percent, discount_amount, status
            FROM orders
            WHERE customer_id = ?1 AND status = ?2
            ORDER BY id
            "#,
        )
        .bind(customer_id)
        .bind(OrderStatus::Pending)
        .fetch_all(&self.pool)
        .await?;

        debug!(customer_id, count = rows.len(), "Loaded pending orders");

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.get_items(row.id).await?;
            orders.push(row.into_order(items)?);
        }

        Ok(orders)
    }

    /// Gets all items of an order with product snapshots attached.
    pub async fn get_items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let mut item = row.into_item()?;
            item.product = self.products.get_by_id(item.product_id).await?;
            items.push(item);
        }

        Ok(items)
    }

    /// Gets an order by ID, items loaded.
    pub async fn get_by_id(&self, order_id: i64) -> DbResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, customer_id, order_date, total_amount,
                   discount_percent, discount_amount, status
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.get_items(row.id).await?;
                Ok(Some(row.into_order(items)?))
            }
            None => Ok(None),
        }
    }

    /// Inserts an order and its items in one transaction.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(id = order.id, customer_id = order.customer_id, "Inserting order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_id, order_date,
                total_amount, discount_percent, discount_amount, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(order.id)
        .bind(order.customer_id)
        .bind(order.order_date)
        .bind(order.total_amount.amount().to_string())
        .bind(order.discount_percent.to_string())
        .bind(order.discount_amount.amount().to_string())
        .bind(order.status)
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, quantity, unit_price)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(item.id)
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price.amount().to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Writes amounts, discount and status of an existing order.
    pub async fn update(&self, order: &Order) -> DbResult<()> {
        debug!(id = order.id, status = %order.status, "Updating order");

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                total_amount = ?2,
                discount_percent = ?3,
                discount_amount = ?4,
                status = ?5
            WHERE id = ?1
            "#,
        )
        .bind(order.id)
        .bind(order.total_amount.amount().to_string())
        .bind(order.discount_percent.to_string())
        .bind(order.discount_amount.amount().to_string())
        .bind(order.status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order.id));
        }

        Ok(())
    }

    /// Sets only the status of an order.
    pub async fn update_status(&self, order_id: i64, status: OrderStatus) -> DbResult<()> {
        debug!(id = order_id, status = %status, "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
            .bind(order_id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order_id));
        }

        Ok(())
    }

    /// Appends an audit line stamped with the current time.
    pub async fn add_log(&self, order_id: i64, message: &str) -> DbResult<()> {
        sqlx::query("INSERT INTO order_logs (order_id, log_date, message) VALUES (?1, ?2, ?3)")
            .bind(order_id)
            .bind(Utc::now())
            .bind(message)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Audit lines of an order, oldest first.
    pub async fn get_logs(&self, order_id: i64) -> DbResult<Vec<OrderLog>> {
        let rows: Vec<OrderLogRow> = sqlx::query_as(
            r#"
            SELECT id, order_id, log_date, message
            FROM order_logs
            WHERE order_id = ?1
            ORDER BY log_date, id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderLog::from).collect())
    }
}

// =============================================================================
// Port Implementation
// =============================================================================

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn get_pending_orders_by_customer_id(
        &self,
        customer_id: i64,
    ) -> RepositoryResult<Vec<Order>> {
        self.get_pending_by_customer(customer_id)
            .await
            .map_err(|e| e.into_repository("get_pending_orders_by_customer_id"))
    }

    async fn get_order_items_by_order_id(&self, order_id: i64) -> RepositoryResult<Vec<OrderItem>> {
        self.get_items(order_id)
            .await
            .map_err(|e| e.into_repository("get_order_items_by_order_id"))
    }

    async fn get_order_by_id(&self, order_id: i64) -> RepositoryResult<Option<Order>> {
        self.get_by_id(order_id)
            .await
            .map_err(|e| e.into_repository("get_order_by_id"))
    }

    async fn update_order(&self, order: &Order) -> RepositoryResult<()> {
        self.update(order)
            .await
            .map_err(|e| e.into_repository("update_order"))
    }

    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> RepositoryResult<()> {
        self.update_status(order_id, status)
            .await
            .map_err(|e| e.into_repository("update_order_status"))
    }

    async fn add_order_log(&self, order_id: i64, message: &str) -> RepositoryResult<()> {
        self.add_log(order_id, message)
            .await
            .map_err(|e| e.into_repository("add_order_log"))
    }
}
