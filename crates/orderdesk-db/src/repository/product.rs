//! # Product Repository
//!
//! Product catalogue lookups, also used to attach product snapshots to
//! order items.

use async_trait::async_trait;
use orderdesk_core::{Money, Product, ProductRepository, RepositoryResult};
use sqlx::SqlitePool;
use tracing::debug;

use super::parse_decimal;
use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    category: String,
    price: String,
}

impl ProductRow {
    fn into_product(self) -> DbResult<Product> {
        Ok(Product {
            id: self.id,
            name: self.name,
            category: self.category,
            price: Money::new(parse_decimal("products.price", &self.price)?),
        })
    }
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Creates a new SqliteProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteProductRepository { pool }
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, category, price
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Inserts a product with its own id.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, category, price)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price.amount().to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn get_product_by_id(&self, product_id: i64) -> RepositoryResult<Option<Product>> {
        self.get_by_id(product_id)
            .await
            .map_err(|e| e.into_repository("get_product_by_id"))
    }
}
