//! Handler for `GET /stats` and the catch-all service description.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};
use wms_core::{InventoryStore, Warehouse, stats::Stats};

use crate::error::ApiError;

/// `GET /stats` — counts for the current UTC day.
pub async fn handler<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
) -> Result<Json<Stats>, ApiError> {
  Ok(Json(warehouse.compute_stats().await?))
}

/// Any unmatched route: name the service and list what it serves.
pub async fn info() -> Json<Value> {
  Json(json!({
    "message": "WMS API v1.0",
    "endpoints": [
      "GET /products",
      "POST /products",
      "GET /products/{id}",
      "PATCH /products/{id}",
      "GET /movements",
      "GET /movements/{id}",
      "POST /movements/inbound",
      "POST /movements/outbound",
      "GET /suppliers",
      "POST /suppliers",
      "GET /suppliers/{id}",
      "PATCH /suppliers/{id}",
      "GET /stats",
    ],
  }))
}
