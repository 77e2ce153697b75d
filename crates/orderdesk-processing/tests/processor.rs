//! Workflow tests against in-memory collaborators.

mod common;

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use common::{customer, item, pending_order, Call, FakeStore, FixedDiscount};
use orderdesk_core::{
    CoreError, DiscountCalculator, DiscountPolicy, OrderStatus, ORDER_ON_HOLD_LOG,
};
use orderdesk_processing::{OrderProcessor, ProcessError};
use rust_decimal_macros::dec;

fn processor(store: &Arc<FakeStore>, discounts: Arc<dyn DiscountPolicy>) -> OrderProcessor {
    OrderProcessor::new(store.clone(), store.clone(), store.clone(), discounts)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[tokio::test]
async fn test_rejects_non_positive_customer_id_without_calls() {
    let store = Arc::new(FakeStore::new());
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(0))));

    for bad_id in [0, -1, i64::MIN] {
        let err = processor.process_customer_orders(bad_id).await.unwrap_err();
        assert!(err.is_invalid_argument());
        match err {
            ProcessError::InvalidArgument(inner) => assert_eq!(inner.field(), "customer_id"),
            other => panic!("unexpected error: {other}"),
        }
    }

    assert!(store.calls().await.is_empty());
}

#[tokio::test]
async fn test_unknown_customer_is_not_found_and_orders_untouched() {
    let store = Arc::new(FakeStore::new());
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(0))));

    let err = processor.process_customer_orders(999).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, ProcessError::CustomerNotFound(999)));
    assert_eq!(store.calls().await, vec![Call::GetCustomer(999)]);
}

#[tokio::test]
async fn test_no_pending_orders_returns_empty() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(0))));

    let processed = processor.process_customer_orders(1).await.unwrap();

    assert!(processed.is_empty());
    assert_eq!(
        store.calls().await,
        vec![Call::GetCustomer(1), Call::GetPendingOrders(1)]
    );
}

#[tokio::test]
async fn test_ready_order_full_sequence() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, true, today())).await;
    store
        .add_order(pending_order(
            10,
            1,
            vec![item(1, 10, 100, 2, dec!(10.99)), item(2, 10, 200, 1, dec!(20.99))],
        ))
        .await;
    store.set_stock(100, 5).await;
    store.set_stock(200, 1).await;
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(10))));

    let processed = processor.process_customer_orders(1).await.unwrap();

    // subtotal 42.97, 10% → 4.297, total 38.673
    assert_eq!(processed.len(), 1);
    let order = &processed[0];
    assert_eq!(order.status, OrderStatus::Ready);
    assert!(order.is_ready_for_shipping());
    assert_eq!(order.discount_percent, dec!(10));
    assert_eq!(order.discount_amount.amount(), dec!(4.297));
    assert_eq!(order.total_amount.amount(), dec!(38.673));

    assert_eq!(store.stock(100).await, Some(3));
    assert_eq!(store.stock(200).await, Some(0));

    assert_eq!(
        store.calls().await,
        vec![
            Call::GetCustomer(1),
            Call::GetPendingOrders(1),
            Call::UpdateOrder {
                id: 10,
                status: OrderStatus::Processed
            },
            Call::GetStock(100),
            Call::GetStock(200),
            Call::UpdateStock(100, 2),
            Call::UpdateStock(200, 1),
            Call::UpdateStatus(10, OrderStatus::Ready),
            Call::AddLog(
                10,
                "Order completed with 10% discount. Total amount: 38.67".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn test_insufficient_stock_puts_order_on_hold() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    store
        .add_order(pending_order(
            20,
            1,
            vec![
                item(1, 20, 100, 1, dec!(5)),
                item(2, 20, 200, 3, dec!(5)),
                item(3, 20, 300, 1, dec!(5)),
            ],
        ))
        .await;
    store.set_stock(100, 10).await;
    store.set_stock(200, 2).await;
    store.set_stock(300, 10).await;
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(10))));

    let processed = processor.process_customer_orders(1).await.unwrap();

    // Discount is applied and persisted before the stock check: 25 → 2.5 off.
    let held = &processed[0];
    assert_eq!(held.status, OrderStatus::OnHold);
    assert_eq!(held.discount_percent, dec!(10));
    assert_eq!(held.discount_amount.amount(), dec!(2.5));
    assert_eq!(held.total_amount.amount(), dec!(22.5));

    let stored = store.order(20).await.unwrap();
    assert_eq!(stored.status, OrderStatus::OnHold);
    assert_eq!(stored.discount_amount, held.discount_amount);
    assert_eq!(stored.total_amount, held.total_amount);
    assert_eq!(store.logs(20).await, vec![ORDER_ON_HOLD_LOG.to_string()]);

    let calls = store.calls().await;
    // Short-circuits at product 200: product 300 is never read.
    assert!(calls.contains(&Call::GetStock(200)));
    assert!(!calls.contains(&Call::GetStock(300)));
    assert!(!calls.iter().any(|c| matches!(c, Call::UpdateStock(..))));
    assert!(calls.contains(&Call::UpdateStatus(20, OrderStatus::OnHold)));

    assert_eq!(store.stock(100).await, Some(10));
    assert_eq!(store.stock(200).await, Some(2));
}

#[tokio::test]
async fn test_missing_inventory_record_counts_as_insufficient() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    store
        .add_order(pending_order(30, 1, vec![item(1, 30, 404, 1, dec!(1))]))
        .await;
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(0))));

    let processed = processor.process_customer_orders(1).await.unwrap();

    assert_eq!(processed[0].status, OrderStatus::OnHold);
    assert_eq!(store.stock(404).await, None);
}

#[tokio::test]
async fn test_stock_exactly_equal_to_quantity_is_enough() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    store
        .add_order(pending_order(31, 1, vec![item(1, 31, 100, 4, dec!(1))]))
        .await;
    store.set_stock(100, 4).await;
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(0))));

    let processed = processor.process_customer_orders(1).await.unwrap();

    assert_eq!(processed[0].status, OrderStatus::Ready);
    assert_eq!(store.stock(100).await, Some(0));
}

#[tokio::test]
async fn test_orders_returned_in_fetch_order_with_mixed_outcomes() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    store
        .add_order(pending_order(3, 1, vec![item(1, 3, 100, 1, dec!(10))]))
        .await;
    store
        .add_order(pending_order(1, 1, vec![item(2, 1, 200, 1, dec!(10))]))
        .await;
    store
        .add_order(pending_order(2, 1, vec![item(3, 2, 100, 1, dec!(10))]))
        .await;
    store.set_stock(100, 1).await;
    store.set_stock(200, 1).await;
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(0))));

    let processed = processor.process_customer_orders(1).await.unwrap();

    let summary: Vec<_> = processed.iter().map(|o| (o.id, o.status)).collect();
    // Order 3 takes the last unit of product 100, so order 2 is held.
    assert_eq!(
        summary,
        vec![
            (3, OrderStatus::Ready),
            (1, OrderStatus::Ready),
            (2, OrderStatus::OnHold)
        ]
    );
}

#[tokio::test]
async fn test_only_pending_orders_of_customer_are_processed() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    store.add_customer(customer(2, false, today())).await;

    let mut already_ready = pending_order(5, 1, vec![item(1, 5, 100, 1, dec!(1))]);
    already_ready.status = OrderStatus::Ready;
    store.add_order(already_ready).await;
    store
        .add_order(pending_order(6, 2, vec![item(2, 6, 100, 1, dec!(1))]))
        .await;
    store.set_stock(100, 10).await;
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(0))));

    assert!(processor.process_customer_orders(1).await.unwrap().is_empty());
    assert_eq!(store.stock(100).await, Some(10));
}

#[tokio::test]
async fn test_second_run_finds_nothing() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    store
        .add_order(pending_order(7, 1, vec![item(1, 7, 100, 1, dec!(1))]))
        .await;
    store.set_stock(100, 0).await;
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(0))));

    assert_eq!(processor.process_customer_orders(1).await.unwrap().len(), 1);
    assert!(processor.process_customer_orders(1).await.unwrap().is_empty());
    assert_eq!(store.order(7).await.unwrap().status, OrderStatus::OnHold);
}

#[tokio::test]
async fn test_collaborator_failure_aborts_batch() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    for id in [1, 2, 3] {
        store
            .add_order(pending_order(id, 1, vec![item(id, id, 100, 1, dec!(1))]))
            .await;
    }
    store.set_stock(100, 10).await;
    // Second order's status update fails.
    store.fail_on("update_order_status", 2).await;
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(0))));

    let err = processor.process_customer_orders(1).await.unwrap_err();

    match err {
        ProcessError::Repository(inner) => assert_eq!(inner.operation, "update_order_status"),
        other => panic!("unexpected error: {other}"),
    }

    // First order's updates stand.
    assert_eq!(store.order(1).await.unwrap().status, OrderStatus::Ready);
    assert_eq!(store.logs(1).await.len(), 1);

    // Second order got as far as the full update and the stock decrement.
    assert_eq!(store.order(2).await.unwrap().status, OrderStatus::Processed);
    assert!(store.logs(2).await.is_empty());

    // Third order is untouched.
    assert_eq!(store.order(3).await.unwrap().status, OrderStatus::Pending);
    assert_eq!(store.stock(100).await, Some(8));
}

#[tokio::test]
async fn test_customer_lookup_failure_propagates() {
    let store = Arc::new(FakeStore::new());
    store.fail_on("get_customer_by_id", 1).await;
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(0))));

    let err = processor.process_customer_orders(1).await.unwrap_err();

    assert!(matches!(err, ProcessError::Repository(_)));
    assert_eq!(store.calls().await, vec![Call::GetCustomer(1)]);
}

#[tokio::test]
async fn test_with_real_discount_policy_caps_at_25() {
    let store = Arc::new(FakeStore::new());
    let registered = today() - Duration::days(6 * 365 + 2);
    store.add_customer(customer(1, true, registered)).await;
    store
        .add_order(pending_order(
            40,
            1,
            vec![item(1, 40, 100, 100, dec!(110.00))],
        ))
        .await;
    store.set_stock(100, 100).await;
    let processor = processor(&store, Arc::new(DiscountCalculator::new()));

    let processed = processor.process_customer_orders(1).await.unwrap();

    // 11,000 with VIP + 5-year loyalty + top value tier = 30 → 25
    let order = &processed[0];
    assert_eq!(order.discount_percent, dec!(25));
    assert_eq!(order.discount_amount.amount(), dec!(2750));
    assert_eq!(order.total_amount.amount(), dec!(8250));
    assert_eq!(
        store.logs(40).await,
        vec!["Order completed with 25% discount. Total amount: 8250.00".to_string()]
    );
}

#[tokio::test]
async fn test_empty_order_is_ready_with_zero_total() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    store.add_order(pending_order(50, 1, vec![])).await;
    let processor = processor(&store, Arc::new(DiscountCalculator::new()));

    let processed = processor.process_customer_orders(1).await.unwrap();

    assert_eq!(processed[0].status, OrderStatus::Ready);
    assert!(processed[0].total_amount.is_zero());
}

#[tokio::test]
async fn test_new_customer_single_item_in_stock() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    store
        .add_order(pending_order(60, 1, vec![item(1, 60, 100, 1, dec!(100.00))]))
        .await;
    store.set_stock(100, 10).await;
    let processor = processor(&store, Arc::new(DiscountCalculator::new()));

    let processed = processor.process_customer_orders(1).await.unwrap();

    let order = &processed[0];
    assert_eq!(order.status, OrderStatus::Ready);
    assert_eq!(order.discount_percent, dec!(0));
    assert_eq!(order.total_amount.amount(), dec!(100.00));
    assert_eq!(store.stock(100).await, Some(9));
    assert_eq!(
        store.logs(60).await,
        vec!["Order completed with 0% discount. Total amount: 100.00".to_string()]
    );
}

#[tokio::test]
async fn test_new_customer_quantity_above_stock_is_held() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    store
        .add_order(pending_order(61, 1, vec![item(1, 61, 100, 10, dec!(100.00))]))
        .await;
    store.set_stock(100, 3).await;
    let processor = processor(&store, Arc::new(DiscountCalculator::new()));

    let processed = processor.process_customer_orders(1).await.unwrap();

    // 1,000.00 is not above the first value tier.
    let order = &processed[0];
    assert_eq!(order.status, OrderStatus::OnHold);
    assert_eq!(order.discount_percent, dec!(0));
    assert_eq!(order.total_amount.amount(), dec!(1000.00));
    assert_eq!(store.order(61).await.unwrap().total_amount.amount(), dec!(1000.00));
    assert_eq!(store.stock(100).await, Some(3));
    assert_eq!(store.logs(61).await, vec![ORDER_ON_HOLD_LOG.to_string()]);
}

#[tokio::test]
async fn test_amount_overflow_is_a_domain_error() {
    let store = Arc::new(FakeStore::new());
    store.add_customer(customer(1, false, today())).await;
    store
        .add_order(pending_order(
            70,
            1,
            vec![item(1, 70, 100, i64::MAX, dec!(100000000000))],
        ))
        .await;
    store
        .add_order(pending_order(71, 1, vec![item(2, 71, 100, 1, dec!(1))]))
        .await;
    store.set_stock(100, i64::MAX).await;
    let processor = processor(&store, Arc::new(FixedDiscount(dec!(0))));

    let err = processor.process_customer_orders(1).await.unwrap_err();

    assert!(matches!(
        err,
        ProcessError::Domain(CoreError::AmountOverflow("multiply_quantity"))
    ));
    assert!(!err.is_invalid_argument());

    // Nothing was written for either order.
    assert_eq!(
        store.calls().await,
        vec![Call::GetCustomer(1), Call::GetPendingOrders(1)]
    );
    assert_eq!(store.order(70).await.unwrap().status, OrderStatus::Pending);
    assert_eq!(store.order(71).await.unwrap().status, OrderStatus::Pending);
}
