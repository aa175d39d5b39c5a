//! Catalog product models.

use serde::{Deserialize, Serialize};

use shopdesk_core::{Category, Price, ProductId, StockLevel};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Catalog category. Products created by the plain product list carry none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Unit price.
    pub price: Price,
    /// Units on hand. Signed because completing an order never clamps.
    pub quantity: i64,
}

impl Product {
    /// Availability bucket for the current quantity.
    #[must_use]
    pub const fn stock_level(&self) -> StockLevel {
        StockLevel::from_quantity(self.quantity)
    }

    /// Whether at least `quantity` units are on hand.
    #[must_use]
    pub fn has_stock_for(&self, quantity: u32) -> bool {
        i64::from(quantity) <= self.quantity
    }
}

/// Input for creating or editing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    /// Display name.
    pub name: String,
    /// Catalog category.
    #[serde(default)]
    pub category: Option<Category>,
    /// Unit price.
    pub price: Price,
    /// Units on hand.
    pub quantity: i64,
}

impl ProductInput {
    /// Build the stored product for `id`.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name.trim().to_owned(),
            category: self.category,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_category() {
        let json = r#"{"id":1,"name":"Laptop Dell XPS 13","price":25000000,"quantity":10}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.category, None);
        assert_eq!(product.price, Price::from_dong(25_000_000));

        let back = serde_json::to_value(&product).unwrap();
        assert!(back.get("category").is_none());
    }

    #[test]
    fn test_deserialize_with_label_category() {
        let json = r#"{"id":2,"name":"iPhone 15 Pro Max","category":"Điện thoại","price":30000000,"quantity":8}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.category, Some(Category::Phone));
        assert_eq!(product.stock_level(), StockLevel::Low);
    }

    #[test]
    fn test_has_stock_for() {
        let product = ProductInput {
            name: "AirPods Pro 2".to_string(),
            category: Some(Category::Accessory),
            price: Price::from_dong(6_000_000),
            quantity: 3,
        }
        .into_product(ProductId::new(6));

        assert!(product.has_stock_for(3));
        assert!(!product.has_stock_for(4));
    }

    #[test]
    fn test_into_product_trims_name() {
        let product = ProductInput {
            name: "  iPad Air M2 ".to_string(),
            category: None,
            price: Price::from_dong(18_000_000),
            quantity: 5,
        }
        .into_product(ProductId::new(4));
        assert_eq!(product.name, "iPad Air M2");
    }
}
