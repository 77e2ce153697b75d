//! # Inventory Repository
//!
//! Stock level per product. A product without a row has no stock record,
//! which the workflow treats the same as insufficient stock.

use async_trait::async_trait;
use orderdesk_core::{InventoryRepository, RepositoryResult};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for inventory database operations.
#[derive(Debug, Clone)]
pub struct SqliteInventoryRepository {
    pool: SqlitePool,
}

impl SqliteInventoryRepository {
    /// Creates a new SqliteInventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteInventoryRepository { pool }
    }

    /// Current stock, or `None` without an inventory row.
    pub async fn get_stock(&self, product_id: i64) -> DbResult<Option<i64>> {
        let stock: Option<i64> =
            sqlx::query_scalar("SELECT stock_quantity FROM inventory WHERE product_id = ?1")
                .bind(product_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(stock)
    }

    /// Subtracts `quantity` from the stock of `product_id`.
    ///
    /// No floor is enforced; callers check sufficiency first.
    pub async fn decrement_stock(&self, product_id: i64, quantity: i64) -> DbResult<()> {
        debug!(product_id, quantity, "Decrementing stock");

        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET stock_quantity = stock_quantity - ?2
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Inventory", product_id));
        }

        Ok(())
    }

    /// Sets the absolute stock level, creating the row if needed.
    pub async fn set_stock(&self, product_id: i64, quantity: i64) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inventory (product_id, stock_quantity)
            VALUES (?1, ?2)
            ON CONFLICT(product_id) DO UPDATE SET stock_quantity = excluded.stock_quantity
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl InventoryRepository for SqliteInventoryRepository {
    async fn get_stock_quantity_by_product_id(
        &self,
        product_id: i64,
    ) -> RepositoryResult<Option<i64>> {
        self.get_stock(product_id)
            .await
            .map_err(|e| e.into_repository("get_stock_quantity_by_product_id"))
    }

    async fn update_stock_quantity(&self, product_id: i64, quantity: i64) -> RepositoryResult<()> {
        self.decrement_stock(product_id, quantity)
            .await
            .map_err(|e| e.into_repository("update_stock_quantity"))
    }
}
