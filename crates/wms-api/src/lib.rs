//! JSON REST API for the warehouse inventory service.
//!
//! Exposes an axum [`Router`] over a [`Warehouse`] backed by any
//! [`InventoryStore`]. The backend is chosen by the caller once, at startup;
//! handlers never know which one they run against.
//!
//! Every error body has the shape `{"success": false, "error": "<message>"}`.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = wms_api::api_router(Arc::new(Warehouse::new(store)));
//! ```

pub mod error;
pub mod movements;
pub mod products;
pub mod stats;
pub mod suppliers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use serde::Serialize;
use wms_core::{InventoryStore, Warehouse};

pub use error::ApiError;

/// Response body for collection listings.
#[derive(Debug, Serialize)]
pub struct DocumentList<T> {
  pub documents: Vec<T>,
  pub total:     usize,
}

impl<T> DocumentList<T> {
  pub fn new(documents: Vec<T>) -> Self {
    Self { total: documents.len(), documents }
  }
}

/// Build a fully-materialised API router for `warehouse`.
pub fn api_router<S>(warehouse: Arc<Warehouse<S>>) -> Router<()>
where
  S: InventoryStore + 'static,
{
  Router::new()
    // Products
    .route("/products", get(products::list::<S>).post(products::create::<S>))
    .route(
      "/products/{id}",
      get(products::get_one::<S>).patch(products::update::<S>),
    )
    // Movements
    .route("/movements", get(movements::list::<S>))
    .route("/movements/inbound", post(movements::inbound::<S>))
    .route("/movements/outbound", post(movements::outbound::<S>))
    .route("/movements/{id}", get(movements::get_one::<S>))
    // Suppliers
    .route("/suppliers", get(suppliers::list::<S>).post(suppliers::create::<S>))
    .route(
      "/suppliers/{id}",
      get(suppliers::get_one::<S>).patch(suppliers::update::<S>),
    )
    // Stats
    .route("/stats", get(stats::handler::<S>))
    // Unknown paths and unsupported methods both describe the API.
    .fallback(stats::info)
    .method_not_allowed_fallback(stats::info)
    .with_state(warehouse)
}

#[cfg(test)]
mod tests;
