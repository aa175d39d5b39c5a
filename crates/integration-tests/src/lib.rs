//! Integration tests for Shopdesk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopdesk-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `order_lifecycle` - Stock effects of order status changes
//! - `catalog_snapshots` - Catalog edits versus stored order snapshots
//! - `file_store` - Persistence across reloads of the JSON file store
//!
//! This library holds the fixtures shared by those test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use shopdesk_admin::AdminState;
use shopdesk_admin::models::{LineItemInput, NewOrder, Product};
use shopdesk_admin::storage::{KeyValueStore, MemoryStore, PRODUCTS_KEY, save_collection};
use shopdesk_core::{Category, Price, ProductId};

/// Build a product fixture.
#[must_use]
pub fn product(id: i64, name: &str, price: i64, quantity: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category: Some(Category::Accessory),
        price: Price::from_dong(price),
        quantity,
    }
}

/// State over a memory store holding exactly `products` and no orders.
///
/// # Panics
///
/// Panics if the fixture cannot be written, which only happens on a bug in
/// the memory store.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn state_with(products: &[Product]) -> AdminState<MemoryStore> {
    let mut store = MemoryStore::new();
    save_collection(&mut store, PRODUCTS_KEY, products).unwrap();
    AdminState::load(store, true).unwrap()
}

/// A valid order form for the given `(product_id, quantity)` lines.
#[must_use]
pub fn order_form(items: &[(i64, u32)]) -> NewOrder {
    NewOrder {
        customer_name: "Hoàng Văn E".to_owned(),
        phone: "0933333333".to_owned(),
        address: "88 Nguyễn Huệ, TP.HCM".to_owned(),
        items: items
            .iter()
            .map(|&(id, quantity)| LineItemInput {
                product_id: ProductId::new(id),
                quantity,
            })
            .collect(),
    }
}

/// Current stock of a product.
///
/// # Panics
///
/// Panics if the product does not exist.
#[must_use]
#[allow(clippy::expect_used)]
pub fn stock_of<S: KeyValueStore>(state: &AdminState<S>, id: i64) -> i64 {
    state
        .product(ProductId::new(id))
        .expect("product exists")
        .quantity
}
