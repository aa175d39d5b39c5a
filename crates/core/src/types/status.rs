//! Status enums for orders, catalog categories, and stock levels.
//!
//! Stored data uses the Vietnamese labels shown to shop staff. Parsing also
//! accepts the English snake_case names so the enums are easy to type on a
//! command line.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a label does not match any variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseLabelError {
    /// What was being parsed (e.g. "order status").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Order lifecycle status.
///
/// Any status may move to any other; stock effects of a move are decided by
/// the order coordinator, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Chờ xử lý", alias = "pending")]
    Pending,
    #[serde(rename = "Đang giao", alias = "shipping")]
    Shipping,
    #[serde(rename = "Hoàn thành", alias = "completed")]
    Completed,
    #[serde(rename = "Đã hủy", alias = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Shipping, Self::Completed, Self::Cancelled];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Chờ xử lý",
            Self::Shipping => "Đang giao",
            Self::Completed => "Hoàn thành",
            Self::Cancelled => "Đã hủy",
        }
    }

    /// English snake_case name.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Shipping => "shipping",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label() == s || status.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLabelError {
                kind: "order status",
                value: s.to_owned(),
            })
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Laptop", alias = "laptop")]
    Laptop,
    #[serde(rename = "Điện thoại", alias = "phone")]
    Phone,
    #[serde(rename = "Máy tính bảng", alias = "tablet")]
    Tablet,
    #[serde(rename = "Phụ kiện", alias = "accessory")]
    Accessory,
}

impl Category {
    /// All categories.
    pub const ALL: [Self; 4] = [Self::Laptop, Self::Phone, Self::Tablet, Self::Accessory];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Laptop => "Laptop",
            Self::Phone => "Điện thoại",
            Self::Tablet => "Máy tính bảng",
            Self::Accessory => "Phụ kiện",
        }
    }

    /// English snake_case name.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Laptop => "laptop",
            Self::Phone => "phone",
            Self::Tablet => "tablet",
            Self::Accessory => "accessory",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s || category.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLabelError {
                kind: "category",
                value: s.to_owned(),
            })
    }
}

/// Stock availability bucket derived from an on-hand quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    InStock,
}

impl StockLevel {
    /// Quantities at or below this (and above zero) count as low stock.
    pub const LOW_THRESHOLD: i64 = 10;

    /// Classify an on-hand quantity.
    ///
    /// Negative quantities, which only arise from unchecked completion
    /// debits, count as [`StockLevel::OutOfStock`] rather than
    /// [`StockLevel::Low`]: only `1..=LOW_THRESHOLD` is low.
    #[must_use]
    pub const fn from_quantity(quantity: i64) -> Self {
        if quantity <= 0 {
            Self::OutOfStock
        } else if quantity <= Self::LOW_THRESHOLD {
            Self::Low
        } else {
            Self::InStock
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Hết hàng",
            Self::Low => "Sắp hết",
            Self::InStock => "Còn hàng",
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_serde_uses_labels() {
        let json = serde_json::to_string(&OrderStatus::Completed).unwrap();
        assert_eq!(json, "\"Hoàn thành\"");

        let parsed: OrderStatus = serde_json::from_str("\"Đã hủy\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn test_order_status_from_str() {
        assert_eq!("Đang giao".parse::<OrderStatus>().unwrap(), OrderStatus::Shipping);
        assert_eq!("pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("Completed".parse::<OrderStatus>().unwrap(), OrderStatus::Completed);
        assert!("returned".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_status_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_category_round_trip_labels() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
            assert_eq!(category.code().parse::<Category>().unwrap(), category);
        }
        let parsed: Category = serde_json::from_str("\"Máy tính bảng\"").unwrap();
        assert_eq!(parsed, Category::Tablet);
    }

    #[test]
    fn test_stock_level_thresholds() {
        assert_eq!(StockLevel::from_quantity(-3), StockLevel::OutOfStock);
        assert_eq!(StockLevel::from_quantity(0), StockLevel::OutOfStock);
        assert_eq!(StockLevel::from_quantity(1), StockLevel::Low);
        assert_eq!(StockLevel::from_quantity(10), StockLevel::Low);
        assert_eq!(StockLevel::from_quantity(11), StockLevel::InStock);
    }

    #[test]
    fn test_parse_label_error_message() {
        let err = "nope".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "invalid category: nope");
    }
}
