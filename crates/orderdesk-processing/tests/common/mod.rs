//! In-memory collaborators shared by the workflow tests.

#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use orderdesk_core::{
    CoreResult, Customer, CustomerRepository, DiscountPolicy, InventoryRepository, Money, Order,
    OrderItem, OrderRepository, OrderStatus, RepositoryError, RepositoryResult,
};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

/// A call made against the store, recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetCustomer(i64),
    GetPendingOrders(i64),
    UpdateOrder { id: i64, status: OrderStatus },
    UpdateStatus(i64, OrderStatus),
    AddLog(i64, String),
    GetStock(i64),
    UpdateStock(i64, i64),
}

#[derive(Default)]
struct State {
    customers: HashMap<i64, Customer>,
    orders: Vec<Order>,
    stock: HashMap<i64, i64>,
    logs: Vec<(i64, String)>,
    calls: Vec<Call>,
    /// Operation name that fails on its Nth invocation (1-based).
    fail_on: Option<(&'static str, usize)>,
    counts: HashMap<&'static str, usize>,
}

/// One fake backing all three ports, so tests can assert call order.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_customer(&self, customer: Customer) {
        self.state.lock().await.customers.insert(customer.id, customer);
    }

    pub async fn add_order(&self, order: Order) {
        self.state.lock().await.orders.push(order);
    }

    pub async fn set_stock(&self, product_id: i64, quantity: i64) {
        self.state.lock().await.stock.insert(product_id, quantity);
    }

    pub async fn fail_on(&self, operation: &'static str, nth: usize) {
        self.state.lock().await.fail_on = Some((operation, nth));
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.state.lock().await.calls.clone()
    }

    pub async fn stock(&self, product_id: i64) -> Option<i64> {
        self.state.lock().await.stock.get(&product_id).copied()
    }

    pub async fn order(&self, order_id: i64) -> Option<Order> {
        self.state
            .lock()
            .await
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
    }

    pub async fn logs(&self, order_id: i64) -> Vec<String> {
        self.state
            .lock()
            .await
            .logs
            .iter()
            .filter(|(id, _)| *id == order_id)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl State {
    fn record(&mut self, operation: &'static str, call: Call) -> RepositoryResult<()> {
        self.calls.push(call);
        let count = self.counts.entry(operation).or_insert(0);
        *count += 1;

        match self.fail_on {
            Some((op, nth)) if op == operation && nth == *count => Err(RepositoryError::new(
                operation,
                "simulated storage failure",
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CustomerRepository for FakeStore {
    async fn get_customer_by_id(&self, customer_id: i64) -> RepositoryResult<Option<Customer>> {
        let mut state = self.state.lock().await;
        state.record("get_customer_by_id", Call::GetCustomer(customer_id))?;
        Ok(state.customers.get(&customer_id).cloned())
    }
}

#[async_trait]
impl OrderRepository for FakeStore {
    async fn get_pending_orders_by_customer_id(
        &self,
        customer_id: i64,
    ) -> RepositoryResult<Vec<Order>> {
        let mut state = self.state.lock().await;
        state.record(
            "get_pending_orders_by_customer_id",
            Call::GetPendingOrders(customer_id),
        )?;
        Ok(state
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id && o.status == OrderStatus::Pending)
            .cloned()
            .collect())
    }

    async fn get_order_items_by_order_id(&self, order_id: i64) -> RepositoryResult<Vec<OrderItem>> {
        let state = self.state.lock().await;
        Ok(state
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .map(|o| o.items.clone())
            .unwrap_or_default())
    }

    async fn get_order_by_id(&self, order_id: i64) -> RepositoryResult<Option<Order>> {
        let state = self.state.lock().await;
        Ok(state.orders.iter().find(|o| o.id == order_id).cloned())
    }

    async fn update_order(&self, order: &Order) -> RepositoryResult<()> {
        let mut state = self.state.lock().await;
        state.record(
            "update_order",
            Call::UpdateOrder {
                id: order.id,
                status: order.status,
            },
        )?;
        if let Some(stored) = state.orders.iter_mut().find(|o| o.id == order.id) {
            stored.total_amount = order.total_amount;
            stored.discount_percent = order.discount_percent;
            stored.discount_amount = order.discount_amount;
            stored.status = order.status;
        }
        Ok(())
    }

    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> RepositoryResult<()> {
        let mut state = self.state.lock().await;
        state.record("update_order_status", Call::UpdateStatus(order_id, status))?;
        if let Some(stored) = state.orders.iter_mut().find(|o| o.id == order_id) {
            stored.status = status;
        }
        Ok(())
    }

    async fn add_order_log(&self, order_id: i64, message: &str) -> RepositoryResult<()> {
        let mut state = self.state.lock().await;
        state.record("add_order_log", Call::AddLog(order_id, message.to_string()))?;
        state.logs.push((order_id, message.to_string()));
        Ok(())
    }
}

#[async_trait]
impl InventoryRepository for FakeStore {
    async fn get_stock_quantity_by_product_id(
        &self,
        product_id: i64,
    ) -> RepositoryResult<Option<i64>> {
        let mut state = self.state.lock().await;
        state.record("get_stock_quantity_by_product_id", Call::GetStock(product_id))?;
        Ok(state.stock.get(&product_id).copied())
    }

    async fn update_stock_quantity(&self, product_id: i64, quantity: i64) -> RepositoryResult<()> {
        let mut state = self.state.lock().await;
        state.record(
            "update_stock_quantity",
            Call::UpdateStock(product_id, quantity),
        )?;
        if let Some(level) = state.stock.get_mut(&product_id) {
            *level -= quantity;
        }
        Ok(())
    }
}

/// Discount policy that always answers with the same percentage.
pub struct FixedDiscount(pub Decimal);

impl DiscountPolicy for FixedDiscount {
    fn calculate_discount_percentage(
        &self,
        _customer: &Customer,
        _total_amount: Money,
    ) -> CoreResult<Decimal> {
        Ok(self.0)
    }
}

// =============================================================================
// Builders
// =============================================================================

pub fn customer(id: i64, is_vip: bool, registration_date: NaiveDate) -> Customer {
    Customer::new(
        id,
        format!("Customer {id}"),
        format!("customer{id}@example.com"),
        is_vip,
        registration_date,
    )
}

pub fn item(id: i64, order_id: i64, product_id: i64, quantity: i64, unit_price: Decimal) -> OrderItem {
    OrderItem {
        id,
        order_id,
        product_id,
        quantity,
        unit_price: Money::new(unit_price),
        product: None,
    }
}

pub fn pending_order(id: i64, customer_id: i64, items: Vec<OrderItem>) -> Order {
    Order {
        id,
        customer_id,
        order_date: Utc::now(),
        total_amount: Money::zero(),
        discount_percent: Decimal::ZERO,
        discount_amount: Money::zero(),
        status: OrderStatus::Pending,
        items,
    }
}
