//! Shopdesk Core - Shared domain types.
//!
//! This crate provides the types used by every Shopdesk component:
//! - `admin` - Catalog and order management with stock coordination
//! - `cli` - Command-line front end for the admin library
//!
//! # Architecture
//!
//! The core crate contains only types and parsing - no I/O, no storage,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, phone numbers, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
