//! # Demo Data
//!
//! A small data set that exercises both workflow outcomes.
//!
//! ```text
//! Customer 1  John Doe     VIP, since 2020-01-01
//!   Order 1   2× Product 1, 1× Product 2       → stock available  → Ready
//!   Order 2   1× Product 4                     → stock 0          → OnHold
//! Customer 2  Jane Smith   since 2021-06-15
//!   Order 3   40× Product 3 (1,239.60)         → stock available  → Ready
//! Customer 3  Bob Johnson  since 2022-03-10
//!   Order 4   1× Product 5                     → no stock record  → OnHold
//! ```

use chrono::{NaiveDate, TimeZone, Utc};
use orderdesk_core::{Customer, Money, Order, OrderItem, OrderStatus, Product};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::pool::Database;

/// (id, name, email, is_vip, registration y/m/d)
const CUSTOMERS: &[(i64, &str, &str, bool, (i32, u32, u32))] = &[
    (1, "John Doe", "john@example.com", true, (2020, 1, 1)),
    (2, "Jane Smith", "jane@example.com", false, (2021, 6, 15)),
    (3, "Bob Johnson", "bob@example.com", false, (2022, 3, 10)),
];

/// (id, price in cents, category, stock; `None` = no inventory row)
const PRODUCTS: &[(i64, i64, &str, Option<i64>)] = &[
    (1, 1099, "Category A", Some(100)),
    (2, 2099, "Category A", Some(50)),
    (3, 3099, "Category B", Some(40)),
    (4, 4099, "Category B", Some(0)),
    (5, 5099, "Category C", None),
];

/// (order id, customer id, [(item id, product id, quantity)])
const ORDERS: &[(i64, i64, &[(i64, i64, i64)])] = &[
    (1, 1, &[(1, 1, 2), (2, 2, 1)]),
    (2, 1, &[(3, 4, 1)]),
    (3, 2, &[(4, 3, 40)]),
    (4, 3, &[(5, 5, 1)]),
];

/// What [`seed_demo_data`] wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
}

/// Inserts the demo data set unless customers already exist.
///
/// Returns `None` when the database was not empty.
pub async fn seed_demo_data(db: &Database) -> DbResult<Option<SeedSummary>> {
    if db.customers().count().await? > 0 {
        info!("Database already has customers, skipping demo data");
        return Ok(None);
    }

    let mut summary = SeedSummary::default();

    for &(id, name, email, is_vip, (y, m, d)) in CUSTOMERS {
        let registered = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| DbError::invalid_data("customers.registration_date", "bad date"))?;
        db.customers()
            .insert(&Customer::new(id, name, email, is_vip, registered))
            .await?;
        summary.customers += 1;
    }

    let mut prices = Vec::with_capacity(PRODUCTS.len());
    for &(id, cents, category, stock) in PRODUCTS {
        let product = Product {
            id,
            name: format!("Product {id}"),
            category: category.to_string(),
            price: Money::from_scaled(cents, 2),
        };
        db.products().insert(&product).await?;
        if let Some(quantity) = stock {
            db.inventory().set_stock(id, quantity).await?;
        }
        prices.push((id, product.price));
        summary.products += 1;
    }

    let order_date = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).single().ok_or_else(|| {
        DbError::invalid_data("orders.order_date", "ambiguous demo timestamp")
    })?;

    for &(order_id, customer_id, lines) in ORDERS {
        let mut items = Vec::with_capacity(lines.len());
        for &(item_id, product_id, quantity) in lines {
            let unit_price = prices
                .iter()
                .find(|(id, _)| *id == product_id)
                .map(|(_, price)| *price)
                .ok_or_else(|| DbError::not_found("Product", product_id))?;

            items.push(OrderItem {
                id: item_id,
                order_id,
                product_id,
                quantity,
                unit_price,
                product: None,
            });
        }

        db.orders()
            .insert(&Order {
                id: order_id,
                customer_id,
                order_date,
                total_amount: Money::zero(),
                discount_percent: Decimal::ZERO,
                discount_amount: Money::zero(),
                status: OrderStatus::Pending,
                items,
            })
            .await?;
        summary.orders += 1;
    }

    info!(
        customers = summary.customers,
        products = summary.products,
        orders = summary.orders,
        "Demo data seeded"
    );

    Ok(Some(summary))
}
