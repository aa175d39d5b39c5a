//! `sd-cli product ...`

use tracing::info;

use shopdesk_admin::AdminState;
use shopdesk_admin::error::AppError;
use shopdesk_admin::models::{Product, ProductInput};
use shopdesk_admin::services::{self, catalog};
use shopdesk_admin::storage::KeyValueStore;
use shopdesk_core::ProductId;

use super::ProductSortArg;

/// Log one page of the (optionally filtered and sorted) catalog.
pub fn list<S: KeyValueStore>(
    state: &AdminState<S>,
    search: Option<&str>,
    sort: Option<ProductSortArg>,
    page: usize,
    per_page: usize,
) {
    let mut items = catalog::search_products(state.products(), search.unwrap_or_default());
    if let Some(sort) = sort {
        catalog::sort_products(&mut items, sort.into());
    }

    let pages = services::page_count(items.len(), per_page);
    let offset = page.saturating_sub(1).saturating_mul(per_page.max(1));

    info!("Products ({} found, page {page}/{pages})", items.len());
    for (i, product) in services::paginate(&items, page, per_page).iter().enumerate() {
        info!("{}", product_row(offset + i + 1, product));
    }
}

/// Add a product and log it.
///
/// # Errors
///
/// Returns `AppError` if validation or persistence fails.
pub fn add<S: KeyValueStore>(state: &mut AdminState<S>, input: ProductInput) -> Result<(), AppError> {
    let product = catalog::add_product(state, input)?;
    info!("Added product {}: {}", product.id, product.name);
    Ok(())
}

/// Edit a product and log the result.
///
/// # Errors
///
/// Returns `AppError` if the product is unknown, or validation or
/// persistence fails.
pub fn edit<S: KeyValueStore>(
    state: &mut AdminState<S>,
    id: ProductId,
    input: ProductInput,
) -> Result<(), AppError> {
    let product = catalog::update_product(state, id, input)?;
    info!("Updated product {}", product_row(1, &product));
    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns `AppError` if the product is unknown or persistence fails.
pub fn delete<S: KeyValueStore>(state: &mut AdminState<S>, id: ProductId) -> Result<(), AppError> {
    let product = catalog::delete_product(state, id)?;
    info!("Deleted product {}: {}", product.id, product.name);
    Ok(())
}

/// One listing row: index, id, name, category, price, stock, and level.
fn product_row(index: usize, product: &Product) -> String {
    format!(
        "{index:>3}. [{}] {} | {} | {} | stock {} ({})",
        product.id,
        product.name,
        product.category.map_or("-", |c| c.label()),
        product.price,
        product.quantity,
        product.stock_level(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopdesk_admin::storage::MemoryStore;

    use super::*;

    #[test]
    fn test_product_row() {
        let state = AdminState::load(MemoryStore::new(), true).unwrap();
        let product = state.product(ProductId::new(6)).unwrap();
        assert_eq!(
            product_row(6, product),
            "  6. [6] AirPods Pro 2 | Phụ kiện | 6.000.000 ₫ | stock 0 (Hết hàng)"
        );
    }

    #[test]
    fn test_add_edit_delete() {
        let mut state = AdminState::load(MemoryStore::new(), false).unwrap();
        let input = ProductInput {
            name: "Chuột".to_string(),
            category: None,
            price: shopdesk_core::Price::from_dong(300_000),
            quantity: 4,
        };
        add(&mut state, input.clone()).unwrap();
        let id = state.products().first().unwrap().id;

        edit(&mut state, id, ProductInput { quantity: 9, ..input }).unwrap();
        assert_eq!(state.product(id).unwrap().quantity, 9);

        delete(&mut state, id).unwrap();
        assert!(state.products().is_empty());
    }
}
