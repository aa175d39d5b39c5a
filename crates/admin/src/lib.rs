//! Shopdesk Admin library.
//!
//! Catalog management and order handling for a single shop, with stock
//! adjustments driven by order status changes.
//!
//! # Architecture
//!
//! - [`state::AdminState`] owns the product and order collections together
//!   with the [`storage::KeyValueStore`] they are mirrored to. There is no
//!   global state; every operation takes the state it works on.
//! - [`services`] holds the operations. Each successful mutation writes the
//!   affected collection back to the store in full.
//! - [`config`] reads the data directory and seeding flag from the
//!   environment.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;
pub mod storage;

pub use error::AppError;
pub use state::AdminState;
