//! Integration tests for order status transitions and stock.
//!
//! These walk orders through the status machine over a memory store and
//! check the stock debits and credits it produces.

#![allow(clippy::unwrap_used)]

use shopdesk_admin::error::AppError;
use shopdesk_admin::services::orders::{create_order, transition};
use shopdesk_core::OrderStatus;
use shopdesk_integration_tests::{order_form, product, state_with, stock_of};

// =============================================================================
// Creation
// =============================================================================

#[test]
fn test_order_within_stock_is_accepted_without_debit() {
    let mut state = state_with(&[product(1, "P1", 100_000, 20)]);

    let order = create_order(&mut state, order_form(&[(1, 5)])).unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(stock_of(&state, 1), 20);
    assert_eq!(state.orders().len(), 1);
}

#[test]
fn test_order_over_stock_is_rejected_before_mutation() {
    let mut state = state_with(&[product(2, "P2", 100_000, 3)]);

    let err = create_order(&mut state, order_form(&[(2, 5)])).unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(state.orders().is_empty());
    assert_eq!(stock_of(&state, 2), 3);
}

#[test]
fn test_total_uses_catalog_prices() {
    let mut state = state_with(&[product(1, "P1", 120_000, 20), product(2, "P2", 35_000, 10)]);

    let order = create_order(&mut state, order_form(&[(1, 2), (2, 3)])).unwrap();

    assert_eq!(order.total_amount, shopdesk_core::Price::from_dong(345_000));
    let snapshot_total: shopdesk_core::Price = order.products.iter().map(|l| l.subtotal()).sum();
    assert_eq!(snapshot_total, order.total_amount);
}

// =============================================================================
// State Transition Tests
// =============================================================================

#[test]
fn test_complete_then_cancel_restores_stock() {
    let mut state = state_with(&[product(1, "P1", 100_000, 20)]);
    let order = create_order(&mut state, order_form(&[(1, 5)])).unwrap();

    transition(&mut state, &order.id, OrderStatus::Completed).unwrap();
    assert_eq!(stock_of(&state, 1), 15);

    transition(&mut state, &order.id, OrderStatus::Cancelled).unwrap();
    assert_eq!(stock_of(&state, 1), 20);
}

#[test]
fn test_completion_debits_exactly_once() {
    let mut state = state_with(&[product(1, "P1", 100_000, 20), product(2, "P2", 50_000, 9)]);
    let order = create_order(&mut state, order_form(&[(1, 5), (2, 4)])).unwrap();

    for _ in 0..3 {
        transition(&mut state, &order.id, OrderStatus::Completed).unwrap();
    }

    assert_eq!(stock_of(&state, 1), 15);
    assert_eq!(stock_of(&state, 2), 5);
}

#[test]
fn test_non_stock_transitions_never_touch_stock() {
    let non_stock = [
        (OrderStatus::Pending, OrderStatus::Shipping),
        (OrderStatus::Shipping, OrderStatus::Cancelled),
        (OrderStatus::Cancelled, OrderStatus::Pending),
        (OrderStatus::Pending, OrderStatus::Cancelled),
    ];

    let mut state = state_with(&[product(1, "P1", 100_000, 20)]);
    let order = create_order(&mut state, order_form(&[(1, 5)])).unwrap();

    for (from, to) in non_stock {
        transition(&mut state, &order.id, from).unwrap();
        let outcome = transition(&mut state, &order.id, to).unwrap();
        assert!(outcome.adjustments.is_empty(), "{from} -> {to} moved stock");
        assert_eq!(stock_of(&state, 1), 20, "{from} -> {to} moved stock");
    }
}

#[test]
fn test_cancelling_pending_order_does_not_credit() {
    let mut state = state_with(&[product(1, "P1", 100_000, 20)]);
    let order = create_order(&mut state, order_form(&[(1, 5)])).unwrap();

    transition(&mut state, &order.id, OrderStatus::Cancelled).unwrap();

    assert_eq!(stock_of(&state, 1), 20);
}

#[test]
fn test_transitions_only_touch_the_target_order() {
    let mut state = state_with(&[product(1, "P1", 100_000, 20)]);
    let first = create_order(&mut state, order_form(&[(1, 2)])).unwrap();
    let second = create_order(&mut state, order_form(&[(1, 3)])).unwrap();

    transition(&mut state, &second.id, OrderStatus::Shipping).unwrap();

    assert_eq!(state.order(&first.id).unwrap().status, OrderStatus::Pending);
    assert_eq!(state.order(&second.id).unwrap().status, OrderStatus::Shipping);
}
