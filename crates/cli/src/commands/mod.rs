//! Subcommand implementations.
//!
//! Output goes through `tracing` at info level, like the rest of the CLI.

pub mod order;
pub mod product;
pub mod seed;

use shopdesk_admin::models::LineItemInput;
use shopdesk_admin::services::catalog::ProductSort;
use shopdesk_admin::services::orders::OrderSort;
use shopdesk_core::ProductId;

/// `--sort` values for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProductSortArg {
    Name,
    Price,
    Quantity,
}

impl From<ProductSortArg> for ProductSort {
    fn from(arg: ProductSortArg) -> Self {
        match arg {
            ProductSortArg::Name => Self::Name,
            ProductSortArg::Price => Self::Price,
            ProductSortArg::Quantity => Self::Quantity,
        }
    }
}

/// `--sort` values for order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OrderSortArg {
    Total,
    Date,
}

impl From<OrderSortArg> for OrderSort {
    fn from(arg: OrderSortArg) -> Self {
        match arg {
            OrderSortArg::Total => Self::Total,
            OrderSortArg::Date => Self::CreatedAt,
        }
    }
}

/// Parse a `<product_id>:<quantity>` line item argument.
pub fn parse_line_item(s: &str) -> Result<LineItemInput, String> {
    let (id, quantity) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <product_id>:<quantity>, got {s:?}"))?;

    let product_id: ProductId = id
        .parse()
        .map_err(|e| format!("invalid product id {id:?}: {e}"))?;
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|e| format!("invalid quantity {quantity:?}: {e}"))?;

    Ok(LineItemInput {
        product_id,
        quantity,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_item() {
        let item = parse_line_item("1735689600000:3").unwrap();
        assert_eq!(item.product_id, ProductId::new(1_735_689_600_000));
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_parse_line_item_errors() {
        assert!(parse_line_item("5").is_err());
        assert!(parse_line_item("x:1").is_err());
        assert!(parse_line_item("1:-2").is_err());
        assert!(parse_line_item("1:").is_err());
    }
}
