//! # Customer Repository
//!
//! Customer lookups. Customers are read-only for the order workflow;
//! `insert` exists for seeding and tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use orderdesk_core::{Customer, CustomerRepository, RepositoryResult};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
    is_vip: bool,
    registration_date: NaiveDate,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email,
            is_vip: row.is_vip,
            registration_date: row.registration_date,
        }
    }
}

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    /// Creates a new SqliteCustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCustomerRepository { pool }
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, is_vip, registration_date
            FROM customers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    /// Inserts a customer with its own id.
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = customer.id, name = %customer.name, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, is_vip, registration_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.is_vip)
        .bind(customer.registration_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts customers (used by the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CustomerRepository for SqliteCustomerRepository {
    async fn get_customer_by_id(&self, customer_id: i64) -> RepositoryResult<Option<Customer>> {
        self.get_by_id(customer_id)
            .await
            .map_err(|e| e.into_repository("get_customer_by_id"))
    }
}
