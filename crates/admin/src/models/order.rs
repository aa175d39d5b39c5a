//! Order models.
//!
//! Line items snapshot the product name and price at creation time, so
//! later catalog edits or deletions never change a stored order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shopdesk_core::{OrderId, OrderStatus, PhoneNumber, Price, ProductId};

/// One product within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    /// Product the line refers to. Lookup only; the product may be gone.
    pub product_id: ProductId,
    /// Product name when the order was created.
    pub product_name: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price when the order was created.
    pub price: Price,
}

impl OrderLineItem {
    /// Line total at the snapshotted price.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A customer order. Only `status` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID (`DH<millis>`).
    pub id: OrderId,
    /// Customer name.
    pub customer_name: String,
    /// Customer phone number.
    pub phone: PhoneNumber,
    /// Delivery address.
    pub address: String,
    /// Ordered line items.
    pub products: Vec<OrderLineItem>,
    /// Total computed when the order was created. Never recomputed.
    pub total_amount: Price,
    /// Current status.
    pub status: OrderStatus,
    /// Calendar date the order was created (UTC).
    pub created_at: NaiveDate,
}

impl Order {
    /// Number of distinct line items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.products.len()
    }
}

/// A requested line item in a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    /// Product to order.
    pub product_id: ProductId,
    /// Units to order.
    pub quantity: u32,
}

/// Input for creating an order. Fields are raw user input and are
/// validated by the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Customer name.
    pub customer_name: String,
    /// Customer phone number as typed.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Requested line items.
    pub items: Vec<LineItemInput>,
}
