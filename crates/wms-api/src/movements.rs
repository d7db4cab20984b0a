//! Handlers for `/movements` endpoints.
//!
//! Movements are append-only; there is no update or delete route. Creating
//! one goes through the reconciler, which adjusts the product's quantity in
//! the same atomic step.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use uuid::Uuid;
use wms_core::{
  InventoryStore, Warehouse,
  movement::{Movement, MovementFilter, MovementRequest, StockChange},
};

use crate::{
  DocumentList,
  error::{ApiError, Body, Params, PathId},
};

/// Response body for a recorded movement.
#[derive(Debug, Serialize)]
pub struct Recorded {
  pub success: bool,
  #[serde(flatten)]
  pub change:  StockChange,
}

impl From<StockChange> for Recorded {
  fn from(change: StockChange) -> Self { Self { success: true, change } }
}

/// `GET /movements[?type=inbound|outbound][&productId=<id>]`
pub async fn list<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
  Params(filter): Params<MovementFilter>,
) -> Result<Json<DocumentList<Movement>>, ApiError> {
  let movements = warehouse.list_movements(filter).await?;
  Ok(Json(DocumentList::new(movements)))
}

/// `GET /movements/{id}`
pub async fn get_one<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
  PathId(id): PathId<Uuid>,
) -> Result<Json<Movement>, ApiError> {
  Ok(Json(warehouse.movement(id).await?))
}

/// `POST /movements/inbound` — body: `{"productId":…,"quantity":…,"reason":…}`
pub async fn inbound<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
  Body(request): Body<MovementRequest>,
) -> Result<Json<Recorded>, ApiError> {
  let change = warehouse.record_inbound(request).await?;
  Ok(Json(change.into()))
}

/// `POST /movements/outbound` — 400 when stock is insufficient.
pub async fn outbound<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
  Body(request): Body<MovementRequest>,
) -> Result<Json<Recorded>, ApiError> {
  let change = warehouse.record_outbound(request).await?;
  Ok(Json(change.into()))
}
