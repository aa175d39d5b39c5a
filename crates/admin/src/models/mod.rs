//! Domain models for admin.

pub mod order;
pub mod product;

pub use order::{LineItemInput, NewOrder, Order, OrderLineItem};
pub use product::{Product, ProductInput};
