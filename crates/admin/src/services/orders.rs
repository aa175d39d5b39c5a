//! Order creation and the status/stock state machine.
//!
//! # Stock rules
//!
//! Creating an order only checks that each line fits in current stock; it
//! holds nothing back. Stock moves on status changes:
//!
//! | From | To | Stock effect |
//! |------|----|--------------|
//! | any other status | `Completed` | debit every line |
//! | `Completed` | `Cancelled` | credit every line back |
//! | anything else | | none |
//!
//! Setting the status an order already has is a no-op. A debit is never
//! re-checked against stock and never clamped, and lines whose product has
//! since been deleted are skipped.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use shopdesk_core::{OrderId, OrderStatus, PhoneNumber, Price, ProductId};

use super::first_free;
use super::validation::{ValidationErrors, require_text};
use crate::error::AppError;
use crate::models::{LineItemInput, NewOrder, Order, OrderLineItem, Product};
use crate::state::AdminState;
use crate::storage::KeyValueStore;

/// Sort key for order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSort {
    /// Total amount, lowest first.
    Total,
    /// Creation date, oldest first.
    CreatedAt,
}

/// Change applied to one product by a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAdjustment {
    /// Product whose stock changed.
    pub product_id: ProductId,
    /// Signed change (negative for a debit).
    pub delta: i64,
    /// Units on hand after the change.
    pub quantity_after: i64,
}

/// Result of [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Status before the call.
    pub from: OrderStatus,
    /// Status after the call.
    pub to: OrderStatus,
    /// Stock changes, in line-item order. Empty when stock was untouched.
    pub adjustments: Vec<StockAdjustment>,
    /// Line items whose product no longer exists.
    pub skipped: Vec<ProductId>,
}

impl Transition {
    /// Whether the call changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Direction of the stock effect for a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StockEffect {
    Debit,
    Credit,
    None,
}

const fn stock_effect(from: OrderStatus, to: OrderStatus) -> StockEffect {
    match (from, to) {
        (OrderStatus::Completed, OrderStatus::Completed) => StockEffect::None,
        (_, OrderStatus::Completed) => StockEffect::Debit,
        (OrderStatus::Completed, OrderStatus::Cancelled) => StockEffect::Credit,
        _ => StockEffect::None,
    }
}

/// Total of `items` at current catalog prices, or `None` if it overflows.
///
/// Items whose product is unknown contribute nothing. This is the figure
/// shown while an order is being drafted and the one stored on creation.
#[must_use]
pub fn draft_total(products: &[Product], items: &[LineItemInput]) -> Option<Price> {
    items
        .iter()
        .filter_map(|item| {
            products
                .iter()
                .find(|p| p.id == item.product_id)
                .map(|p| p.price.checked_times(item.quantity))
        })
        .try_fold(Price::ZERO, |total, line| total.checked_add(line?))
}

fn total_too_large() -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    errors.push("items", "order total is too large");
    errors
}

/// Validate an order form against the current catalog.
///
/// # Errors
///
/// Returns every failing field: blank name or address, malformed phone,
/// no line items, zero quantity, unknown product, quantity above stock, or
/// a total too large to represent.
pub fn validate_order(products: &[Product], input: &NewOrder) -> Result<PhoneNumber, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    require_text(&mut errors, "customerName", &input.customer_name);
    require_text(&mut errors, "address", &input.address);

    let phone = match PhoneNumber::parse(&input.phone) {
        Ok(phone) => Some(phone),
        Err(e) => {
            errors.push("phone", e.to_string());
            None
        }
    };

    if input.items.is_empty() {
        errors.push("items", "at least one product is required");
    }

    for (i, item) in input.items.iter().enumerate() {
        let field = format!("items[{i}]");
        if item.quantity == 0 {
            errors.push(format!("{field}.quantity"), "must be at least 1");
            continue;
        }
        match products.iter().find(|p| p.id == item.product_id) {
            None => errors.push(
                format!("{field}.productId"),
                format!("unknown product {}", item.product_id),
            ),
            Some(product) if !product.has_stock_for(item.quantity) => errors.push(
                format!("{field}.quantity"),
                format!(
                    "exceeds stock for {} ({} available)",
                    product.name, product.quantity
                ),
            ),
            Some(_) => {}
        }
    }

    if errors.is_empty() && draft_total(products, &input.items).is_none() {
        errors.push("items", "order total is too large");
    }

    match phone {
        Some(phone) if errors.is_empty() => Ok(phone),
        _ => Err(errors),
    }
}

/// Create a pending order stamped with the current time.
///
/// # Errors
///
/// Returns `AppError::Validation` if the form is invalid (nothing is
/// changed) and `AppError::Storage` if the order list cannot be persisted.
pub fn create_order<S: KeyValueStore>(
    state: &mut AdminState<S>,
    input: NewOrder,
) -> Result<Order, AppError> {
    create_order_at(state, input, Utc::now())
}

/// Create a pending order stamped with `now`.
///
/// Stock is not touched. The total is computed from live catalog prices.
///
/// # Errors
///
/// See [`create_order`].
pub fn create_order_at<S: KeyValueStore>(
    state: &mut AdminState<S>,
    input: NewOrder,
    now: DateTime<Utc>,
) -> Result<Order, AppError> {
    let phone = validate_order(state.products(), &input)?;

    let total_amount = draft_total(state.products(), &input.items).ok_or_else(total_too_large)?;
    let products = input
        .items
        .iter()
        .filter_map(|item| {
            state.product(item.product_id).map(|product| OrderLineItem {
                product_id: product.id,
                product_name: product.name.clone(),
                quantity: item.quantity,
                price: product.price,
            })
        })
        .collect();

    let id = next_order_id(state.orders(), now.timestamp_millis());
    let order = Order {
        id,
        customer_name: input.customer_name.trim().to_owned(),
        phone,
        address: input.address.trim().to_owned(),
        products,
        total_amount,
        status: OrderStatus::Pending,
        created_at: now.date_naive(),
    };

    let mut orders = state.orders().to_vec();
    orders.push(order.clone());
    state.commit_orders(orders)?;

    tracing::info!(
        order_id = %order.id,
        items = order.item_count(),
        total = %order.total_amount,
        "Order created"
    );
    Ok(order)
}

/// Move an order to `new_status`, adjusting stock as described in the
/// module docs.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown order and `AppError::Storage`
/// if either collection cannot be persisted.
pub fn transition<S: KeyValueStore>(
    state: &mut AdminState<S>,
    order_id: &OrderId,
    new_status: OrderStatus,
) -> Result<Transition, AppError> {
    let order = state
        .order(order_id)
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;

    let from = order.status;
    let mut outcome = Transition {
        from,
        to: new_status,
        adjustments: Vec::new(),
        skipped: Vec::new(),
    };
    if from == new_status {
        return Ok(outcome);
    }

    let effect = stock_effect(from, new_status);
    let mut products = state.products().to_vec();
    if effect != StockEffect::None {
        for line in &order.products {
            let Some(product) = products.iter_mut().find(|p| p.id == line.product_id) else {
                tracing::warn!(
                    order_id = %order_id,
                    product_id = %line.product_id,
                    "Skipping stock adjustment for missing product"
                );
                outcome.skipped.push(line.product_id);
                continue;
            };

            let units = i64::from(line.quantity);
            let delta = if effect == StockEffect::Debit { -units } else { units };
            product.quantity = product.quantity.saturating_add(delta);

            if product.quantity < 0 {
                tracing::warn!(
                    order_id = %order_id,
                    product_id = %product.id,
                    quantity = product.quantity,
                    "Stock is negative after completing order"
                );
            }

            outcome.adjustments.push(StockAdjustment {
                product_id: product.id,
                delta,
                quantity_after: product.quantity,
            });
        }
    }

    let orders = state
        .orders()
        .iter()
        .map(|o| {
            if &o.id == order_id {
                Order {
                    status: new_status,
                    ..o.clone()
                }
            } else {
                o.clone()
            }
        })
        .collect();

    state.commit_transition(products, orders)?;

    tracing::info!(
        order_id = %order_id,
        from = %from,
        to = %new_status,
        adjustments = outcome.adjustments.len(),
        "Order status changed"
    );
    Ok(outcome)
}

/// Sort an order listing in place. Ties keep their creation order.
pub fn sort_orders(items: &mut [&Order], by: OrderSort) {
    items.sort_by(|a, b| compare(a, b, by));
}

fn compare(a: &Order, b: &Order, by: OrderSort) -> Ordering {
    match by {
        OrderSort::Total => a.total_amount.cmp(&b.total_amount),
        OrderSort::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn next_order_id(orders: &[Order], start: i64) -> OrderId {
    let millis = first_free(start, |candidate| {
        let id = OrderId::from_millis(candidate);
        orders.iter().any(|o| o.id == id)
    });
    OrderId::from_millis(millis)
}
