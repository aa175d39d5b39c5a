//! Catalog operations.
//!
//! Deleting or editing a product never touches stored orders: their line
//! items carry their own name and price snapshots.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use shopdesk_core::{Price, ProductId};

use super::first_free;
use super::validation::{ValidationErrors, require_text};
use crate::error::AppError;
use crate::models::{Product, ProductInput};
use crate::state::AdminState;
use crate::storage::KeyValueStore;

/// Sort key for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    /// Case-insensitive name, A to Z.
    Name,
    /// Unit price, lowest first.
    Price,
    /// Units on hand, lowest first.
    Quantity,
}

/// Validate a product form.
///
/// Name is required, price must be positive, quantity must not be negative.
///
/// # Errors
///
/// Returns every failing field.
pub fn validate_product(input: &ProductInput) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    validate_into(&mut errors, "", input);
    errors.into_result()
}

fn validate_into(errors: &mut ValidationErrors, prefix: &str, input: &ProductInput) {
    require_text(errors, &format!("{prefix}name"), &input.name);
    if !input.price.is_positive() {
        errors.push(format!("{prefix}price"), "must be greater than zero");
    } else if input.price.exceeds_max() {
        errors.push(
            format!("{prefix}price"),
            format!("must not exceed {}", Price::from_dong(Price::MAX_DONG)),
        );
    }
    if input.quantity < 0 {
        errors.push(format!("{prefix}quantity"), "must not be negative");
    }
}

/// Add a product with an id derived from the current time.
///
/// # Errors
///
/// Returns `AppError::Validation` for invalid input and `AppError::Storage`
/// if the catalog cannot be persisted.
pub fn add_product<S: KeyValueStore>(
    state: &mut AdminState<S>,
    input: ProductInput,
) -> Result<Product, AppError> {
    add_product_at(state, input, Utc::now())
}

/// Add a product, deriving its id from `now`.
///
/// # Errors
///
/// See [`add_product`].
pub fn add_product_at<S: KeyValueStore>(
    state: &mut AdminState<S>,
    input: ProductInput,
    now: DateTime<Utc>,
) -> Result<Product, AppError> {
    validate_product(&input)?;

    let id = next_product_id(state.products(), now.timestamp_millis());
    let product = input.into_product(id);

    let mut products = state.products().to_vec();
    products.push(product.clone());
    state.commit_products(products)?;

    tracing::info!(product_id = %product.id, name = %product.name, "Product added");
    Ok(product)
}

/// Replace the editable fields of an existing product.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id, `AppError::Validation` for
/// invalid input, and `AppError::Storage` if the catalog cannot be persisted.
pub fn update_product<S: KeyValueStore>(
    state: &mut AdminState<S>,
    id: ProductId,
    input: ProductInput,
) -> Result<Product, AppError> {
    if state.product(id).is_none() {
        return Err(AppError::NotFound(format!("product {id}")));
    }
    validate_product(&input)?;

    let updated = input.into_product(id);
    let products = state
        .products()
        .iter()
        .map(|p| if p.id == id { updated.clone() } else { p.clone() })
        .collect();
    state.commit_products(products)?;

    tracing::info!(product_id = %id, name = %updated.name, "Product updated");
    Ok(updated)
}

/// Remove a product from the catalog.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id and `AppError::Storage` if
/// the catalog cannot be persisted.
pub fn delete_product<S: KeyValueStore>(
    state: &mut AdminState<S>,
    id: ProductId,
) -> Result<Product, AppError> {
    let removed = state
        .product(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let products = state
        .products()
        .iter()
        .filter(|p| p.id != id)
        .cloned()
        .collect();
    state.commit_products(products)?;

    tracing::info!(product_id = %id, name = %removed.name, "Product deleted");
    Ok(removed)
}

/// Add many products at once, or replace the whole catalog.
///
/// Nothing is written unless every input is valid.
///
/// # Errors
///
/// Returns `AppError::Validation` with `products[i].field` paths, or
/// `AppError::Storage` if the catalog cannot be persisted.
pub fn import_products<S: KeyValueStore>(
    state: &mut AdminState<S>,
    inputs: Vec<ProductInput>,
    replace: bool,
) -> Result<Vec<Product>, AppError> {
    import_products_at(state, inputs, replace, Utc::now())
}

/// [`import_products`] with ids derived from `now`.
///
/// # Errors
///
/// See [`import_products`].
pub fn import_products_at<S: KeyValueStore>(
    state: &mut AdminState<S>,
    inputs: Vec<ProductInput>,
    replace: bool,
    now: DateTime<Utc>,
) -> Result<Vec<Product>, AppError> {
    let mut errors = ValidationErrors::default();
    for (i, input) in inputs.iter().enumerate() {
        validate_into(&mut errors, &format!("products[{i}]."), input);
    }
    errors.into_result()?;

    let mut products = if replace {
        Vec::new()
    } else {
        state.products().to_vec()
    };

    let mut imported = Vec::with_capacity(inputs.len());
    let mut next = now.timestamp_millis();
    for input in inputs {
        let id = next_product_id(&products, next);
        next = id.as_i64().saturating_add(1);
        let product = input.into_product(id);
        products.push(product.clone());
        imported.push(product);
    }

    state.commit_products(products)?;

    tracing::info!(imported = imported.len(), replace, "Catalog imported");
    Ok(imported)
}

/// Products whose name contains `query`, ignoring case. A blank query
/// matches everything.
#[must_use]
pub fn search_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Sort a product listing in place. Ties keep their catalog order.
pub fn sort_products(items: &mut [&Product], by: ProductSort) {
    items.sort_by(|a, b| compare(a, b, by));
}

fn compare(a: &Product, b: &Product, by: ProductSort) -> Ordering {
    match by {
        ProductSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        ProductSort::Price => a.price.cmp(&b.price),
        ProductSort::Quantity => a.quantity.cmp(&b.quantity),
    }
}

fn next_product_id(products: &[Product], start: i64) -> ProductId {
    ProductId::new(first_free(start, |candidate| {
        products.iter().any(|p| p.id.as_i64() == candidate)
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use shopdesk_core::Category;

    use super::*;
    use crate::storage::{MemoryStore, PRODUCTS_KEY};

    fn seeded() -> AdminState<MemoryStore> {
        AdminState::load(MemoryStore::new(), true).unwrap()
    }

    fn input(name: &str, price: i64, quantity: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            category: Some(Category::Accessory),
            price: Price::from_dong(price),
            quantity,
        }
    }

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_add_product_uses_time_id_and_persists() {
        let mut state = seeded();
        let product = add_product_at(&mut state, input("Bàn phím cơ", 1_200_000, 30), at(1_700_000_000_000)).unwrap();

        assert_eq!(product.id, ProductId::new(1_700_000_000_000));
        assert_eq!(state.products().len(), 9);

        let stored = state.store().get(PRODUCTS_KEY).unwrap().unwrap();
        assert!(stored.contains("Bàn phím cơ"));
    }

    #[test]
    fn test_add_product_bumps_colliding_id() {
        let mut state = seeded();
        let now = at(1_700_000_000_000);
        let first = add_product_at(&mut state, input("A", 1, 1), now).unwrap();
        let second = add_product_at(&mut state, input("B", 1, 1), now).unwrap();
        assert_eq!(second.id.as_i64(), first.id.as_i64() + 1);
    }

    #[test]
    fn test_add_product_validation_reports_all_fields() {
        let mut state = seeded();
        let err = add_product(&mut state, input("  ", 0, -1)).unwrap_err();

        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.has_field("name"));
        assert!(errors.has_field("price"));
        assert!(errors.has_field("quantity"));
        assert_eq!(state.products().len(), 8);
    }

    #[test]
    fn test_price_above_cap_is_rejected() {
        let mut state = seeded();
        let huge = ProductInput {
            price: Price::parse("79228162514264337593543950335").unwrap(),
            ..input("Siêu máy tính", 1, 1)
        };

        let err = add_product(&mut state, huge).unwrap_err();

        assert!(matches!(err, AppError::Validation(ref e) if e.has_field("price")));
        assert!(validate_product(&input("Đắt", Price::MAX_DONG, 1)).is_ok());
        assert_eq!(state.products().len(), 8);
    }

    #[test]
    fn test_zero_quantity_is_allowed() {
        assert!(validate_product(&input("Hết hàng", 10_000, 0)).is_ok());
    }

    #[test]
    fn test_update_product() {
        let mut state = seeded();
        let updated = update_product(&mut state, ProductId::new(4), input("iPad Air M2 (2024)", 17_500_000, 9)).unwrap();

        assert_eq!(updated.id, ProductId::new(4));
        let stored = state.product(ProductId::new(4)).unwrap();
        assert_eq!(stored.name, "iPad Air M2 (2024)");
        assert_eq!(stored.quantity, 9);
        assert_eq!(stored.category, Some(Category::Accessory));
    }

    #[test]
    fn test_update_unknown_product() {
        let mut state = seeded();
        let err = update_product(&mut state, ProductId::new(404), input("X", 1, 1)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_delete_product() {
        let mut state = seeded();
        let removed = delete_product(&mut state, ProductId::new(6)).unwrap();
        assert_eq!(removed.name, "AirPods Pro 2");
        assert!(state.product(ProductId::new(6)).is_none());
        assert!(matches!(
            delete_product(&mut state, ProductId::new(6)),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_import_products_append_and_replace() {
        let mut state = seeded();
        let now = at(1_700_000_000_000);

        let imported = import_products_at(&mut state, vec![input("A", 1, 1), input("B", 2, 2)], false, now).unwrap();
        assert_eq!(imported.len(), 2);
        assert_ne!(imported.first().unwrap().id, imported.get(1).unwrap().id);
        assert_eq!(state.products().len(), 10);

        import_products_at(&mut state, vec![input("C", 3, 3)], true, now).unwrap();
        assert_eq!(state.products().len(), 1);
    }

    #[test]
    fn test_import_products_is_all_or_nothing() {
        let mut state = seeded();
        let err = import_products(&mut state, vec![input("ok", 1, 1), input("bad", 0, 1)], false).unwrap_err();

        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.has_field("products[1].price"));
        assert_eq!(state.products().len(), 8);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let state = seeded();
        let hits = search_products(state.products(), "samsung");
        assert_eq!(hits.len(), 2);
        assert_eq!(search_products(state.products(), "").len(), 8);
        assert!(search_products(state.products(), "nokia").is_empty());
    }

    #[test]
    fn test_sort_products() {
        let state = seeded();
        let mut items: Vec<&Product> = state.products().iter().collect();

        sort_products(&mut items, ProductSort::Price);
        assert_eq!(items.first().unwrap().name, "Logitech MX Master 3");

        sort_products(&mut items, ProductSort::Quantity);
        assert_eq!(items.first().unwrap().quantity, 0);

        sort_products(&mut items, ProductSort::Name);
        assert_eq!(items.first().unwrap().name, "AirPods Pro 2");
    }
}
