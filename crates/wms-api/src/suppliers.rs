//! Handlers for `/suppliers` endpoints. Mirrors `/products` without the
//! stock rules.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;
use wms_core::{
  InventoryStore, Warehouse,
  supplier::{NewSupplier, Supplier, SupplierPatch},
};

use crate::{
  DocumentList,
  error::{ApiError, Body, PathId},
};

/// `GET /suppliers`
pub async fn list<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
) -> Result<Json<DocumentList<Supplier>>, ApiError> {
  let suppliers = warehouse.list_suppliers().await?;
  Ok(Json(DocumentList::new(suppliers)))
}

/// `GET /suppliers/{id}`
pub async fn get_one<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
  PathId(id): PathId<Uuid>,
) -> Result<Json<Supplier>, ApiError> {
  Ok(Json(warehouse.supplier(id).await?))
}

/// `POST /suppliers`
pub async fn create<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
  Body(input): Body<NewSupplier>,
) -> Result<impl IntoResponse, ApiError> {
  let supplier = warehouse.create_supplier(input).await?;
  Ok((StatusCode::CREATED, Json(supplier)))
}

/// `PATCH /suppliers/{id}`
pub async fn update<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
  PathId(id): PathId<Uuid>,
  Body(patch): Body<SupplierPatch>,
) -> Result<Json<Supplier>, ApiError> {
  Ok(Json(warehouse.update_supplier(id, patch).await?))
}
