//! Handlers for `/products` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/products` | `{documents, total}` |
//! | `POST`  | `/products` | Body: [`NewProduct`]; returns 201 + stored product |
//! | `GET`   | `/products/{id}` | 404 if not found |
//! | `PATCH` | `/products/{id}` | Body: [`ProductPatch`]; `quantity` is not editable |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use uuid::Uuid;
use wms_core::{
  InventoryStore, Warehouse,
  product::{NewProduct, Product, ProductPatch},
};

use crate::{
  DocumentList,
  error::{ApiError, Body, PathId},
};

/// `GET /products`
pub async fn list<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
) -> Result<Json<DocumentList<Product>>, ApiError> {
  let products = warehouse.list_products().await?;
  Ok(Json(DocumentList::new(products)))
}

/// `GET /products/{id}`
pub async fn get_one<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
  PathId(id): PathId<Uuid>,
) -> Result<Json<Product>, ApiError> {
  Ok(Json(warehouse.product(id).await?))
}

/// `POST /products`
pub async fn create<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
  Body(input): Body<NewProduct>,
) -> Result<impl IntoResponse, ApiError> {
  let product = warehouse.create_product(input).await?;
  Ok((StatusCode::CREATED, Json(product)))
}

/// `PATCH /products/{id}`
pub async fn update<S: InventoryStore>(
  State(warehouse): State<Arc<Warehouse<S>>>,
  PathId(id): PathId<Uuid>,
  Body(patch): Body<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
  Ok(Json(warehouse.update_product(id, patch).await?))
}
