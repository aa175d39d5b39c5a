//! `sd-cli order ...`

use tracing::{info, warn};

use shopdesk_admin::AdminState;
use shopdesk_admin::error::AppError;
use shopdesk_admin::models::{NewOrder, Order};
use shopdesk_admin::services::{self, orders};
use shopdesk_admin::storage::KeyValueStore;
use shopdesk_core::{OrderId, OrderStatus};

use super::OrderSortArg;

/// Log one page of orders.
pub fn list<S: KeyValueStore>(
    state: &AdminState<S>,
    sort: Option<OrderSortArg>,
    page: usize,
    per_page: usize,
) {
    let mut items: Vec<&Order> = state.orders().iter().collect();
    if let Some(sort) = sort {
        orders::sort_orders(&mut items, sort.into());
    }

    let pages = services::page_count(items.len(), per_page);
    info!("Orders ({} total, page {page}/{pages})", items.len());
    for order in services::paginate(&items, page, per_page) {
        info!("{}", order_row(order));
    }
}

/// Log one order with its line items.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown order.
pub fn show<S: KeyValueStore>(state: &AdminState<S>, id: &OrderId) -> Result<(), AppError> {
    let order = state
        .order(id)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    info!("Order {} ({}, created {})", order.id, order.status, order.created_at);
    info!("  Customer: {}", order.customer_name);
    info!("  Phone:    {}", order.phone);
    info!("  Address:  {}", order.address);
    for line in &order.products {
        info!(
            "  - {} x{} @ {} = {}",
            line.product_name,
            line.quantity,
            line.price,
            line.subtotal()
        );
    }
    info!("  Total:    {}", order.total_amount);
    Ok(())
}

/// Create an order and log its id and total.
///
/// # Errors
///
/// Returns `AppError::Validation` listing every invalid field, or
/// `AppError::Storage` if the order cannot be saved.
pub fn create<S: KeyValueStore>(state: &mut AdminState<S>, input: NewOrder) -> Result<(), AppError> {
    match orders::draft_total(state.products(), &input.items) {
        Some(preview) => info!("Order total: {preview}"),
        None => warn!("Order total is too large to compute"),
    }

    let order = orders::create_order(state, input)?;
    info!("Created order {} ({})", order.id, order.total_amount);
    Ok(())
}

/// Change an order's status and log the resulting stock moves.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown order, or `AppError::Storage`
/// if the change cannot be saved.
pub fn set_status<S: KeyValueStore>(
    state: &mut AdminState<S>,
    id: &OrderId,
    status: OrderStatus,
) -> Result<(), AppError> {
    let outcome = orders::transition(state, id, status)?;
    if outcome.is_noop() {
        info!("Order {id} is already {status}");
        return Ok(());
    }

    info!("Order {id}: {} -> {}", outcome.from, outcome.to);
    for adjustment in &outcome.adjustments {
        let name = state
            .product(adjustment.product_id)
            .map_or("?", |p| p.name.as_str());
        info!(
            "  stock {name} [{}]: {:+} -> {}",
            adjustment.product_id, adjustment.delta, adjustment.quantity_after
        );
    }
    for product_id in &outcome.skipped {
        warn!("  product {product_id} no longer exists; stock not adjusted");
    }
    Ok(())
}

fn order_row(order: &Order) -> String {
    format!(
        "{} | {} | {} items | {} | {} | {}",
        order.id,
        order.customer_name,
        order.item_count(),
        order.total_amount,
        order.status,
        order.created_at,
    )
}
