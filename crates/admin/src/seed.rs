//! Catalog seeding.
//!
//! Provides the built-in starter catalog and parsing for YAML catalog
//! files of the form:
//!
//! ```yaml
//! products:
//!   - name: Laptop Dell XPS 13
//!     category: laptop
//!     price: 25000000
//!     quantity: 15
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use shopdesk_core::{Category, Price, ProductId};

use crate::models::{Product, ProductInput};

/// Errors that can occur while reading a catalog file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Top-level shape of a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    /// Products to import, in order.
    pub products: Vec<ProductInput>,
}

/// Parse catalog YAML.
///
/// # Errors
///
/// Returns `SeedError::Yaml` if the document does not match [`CatalogFile`].
pub fn parse_catalog(yaml: &str) -> Result<Vec<ProductInput>, SeedError> {
    let file: CatalogFile = serde_yaml::from_str(yaml)?;
    Ok(file.products)
}

/// Read and parse a catalog file.
///
/// # Errors
///
/// Returns `SeedError` if the file cannot be read or parsed.
pub fn read_catalog_file(path: &Path) -> Result<Vec<ProductInput>, SeedError> {
    let yaml = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog(&yaml)
}

/// The starter catalog installed on first run.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    [
        (1, "Laptop Dell XPS 13", Category::Laptop, 25_000_000, 15),
        (2, "iPhone 15 Pro Max", Category::Phone, 30_000_000, 8),
        (3, "Samsung Galaxy S24", Category::Phone, 22_000_000, 20),
        (4, "iPad Air M2", Category::Tablet, 18_000_000, 5),
        (5, "MacBook Air M3", Category::Laptop, 28_000_000, 12),
        (6, "AirPods Pro 2", Category::Accessory, 6_000_000, 0),
        (7, "Samsung Galaxy Tab S9", Category::Tablet, 15_000_000, 7),
        (8, "Logitech MX Master 3", Category::Accessory, 2_500_000, 25),
    ]
    .into_iter()
    .map(|(id, name, category, price, quantity)| Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category: Some(category),
        price: Price::from_dong(price),
        quantity,
    })
    .collect()
}
