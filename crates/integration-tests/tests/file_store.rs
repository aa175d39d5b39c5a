//! Integration tests for persistence through the JSON file store.
//!
//! Every mutation must be visible after reopening the data directory.

#![allow(clippy::unwrap_used)]

use shopdesk_admin::AdminState;
use shopdesk_admin::services::orders::{create_order, transition};
use shopdesk_admin::storage::{JsonFileStore, ORDERS_KEY, PRODUCTS_KEY};
use shopdesk_core::{OrderStatus, ProductId};
use shopdesk_integration_tests::{order_form, stock_of};

fn reopen(dir: &std::path::Path) -> AdminState<JsonFileStore> {
    AdminState::load(JsonFileStore::open(dir).unwrap(), true).unwrap()
}

#[test]
fn test_first_run_installs_default_catalog_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let state = reopen(dir.path());

    assert_eq!(state.products().len(), 8);
    assert!(dir.path().join(format!("{PRODUCTS_KEY}.json")).exists());
    assert!(!dir.path().join(format!("{ORDERS_KEY}.json")).exists());
}

#[test]
fn test_order_and_stock_survive_reload() {
    let dir = tempfile::tempdir().unwrap();

    let order_id = {
        let mut state = reopen(dir.path());
        let order = create_order(&mut state, order_form(&[(1, 5)])).unwrap();
        transition(&mut state, &order.id, OrderStatus::Completed).unwrap();
        order.id
    };

    let state = reopen(dir.path());
    assert_eq!(state.order(&order_id).unwrap().status, OrderStatus::Completed);
    assert_eq!(stock_of(&state, 1), 10);
}

#[test]
fn test_stored_blobs_keep_browser_shape() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut state = reopen(dir.path());
        create_order(&mut state, order_form(&[(3, 1)])).unwrap();
    }

    let raw = std::fs::read_to_string(dir.path().join("orders.json")).unwrap();
    let orders: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let order = orders.get(0).unwrap();

    assert!(order["id"].as_str().unwrap().starts_with("DH"));
    assert_eq!(order["status"], "Chờ xử lý");
    assert_eq!(order["customerName"], "Hoàng Văn E");
    assert_eq!(order["products"][0]["productId"], 3);
    assert_eq!(order["products"][0]["productName"], "Samsung Galaxy S24");
    assert_eq!(order["totalAmount"].as_f64(), Some(22_000_000.0));
    assert!(order["createdAt"].as_str().unwrap().len() == 10);
}

#[test]
fn test_hand_written_blob_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("products.json"),
        r#"[{"id":1700000000000,"name":"Laptop Dell XPS 13","price":25000000,"quantity":10}]"#,
    )
    .unwrap();

    let state = reopen(dir.path());
    assert_eq!(state.products().len(), 1);
    assert!(state.product(ProductId::new(1_700_000_000_000)).unwrap().category.is_none());
}
