//! Core types and trait definitions for the warehouse inventory service.
//!
//! No HTTP or database code lives here.
//! Storage backends implement [`store::InventoryStore`]; the
//! [`warehouse::Warehouse`] service layers the stock rules on top of any of
//! them.

// Store methods spell out `+ Send` on their futures; implementors use
// `async fn`.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod movement;
pub mod product;
pub mod stats;
pub mod store;
pub mod supplier;
pub mod warehouse;

pub use error::{Error, Result};
pub use store::{Collection, InventoryStore};
pub use warehouse::Warehouse;
