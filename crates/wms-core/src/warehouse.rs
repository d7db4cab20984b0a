//! [`Warehouse`] — the service layer every frontend talks to.
//!
//! Validates input, turns missing entries into [`Error::NotFound`], and hands
//! stock movements to [`InventoryStore::apply_movement`], which owns the
//! atomic check-and-adjust.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
  Error, Result,
  movement::{
    Movement, MovementFilter, MovementKind, MovementRequest, NewMovement,
    StockChange,
  },
  product::{NewProduct, Product, ProductPatch},
  stats::{self, Stats},
  store::{Collection, InventoryStore},
  supplier::{NewSupplier, Supplier, SupplierPatch},
};

/// Inventory operations over a single injected backend.
///
/// Construct one per process and share it (e.g. behind an `Arc`).
#[derive(Debug, Clone)]
pub struct Warehouse<S> {
  store: S,
}

impl<S: InventoryStore> Warehouse<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  // ── Products ──────────────────────────────────────────────────────────

  pub async fn list_products(&self) -> Result<Vec<Product>> {
    self.store.list_products().await.map_err(Into::<Error>::into)
  }

  pub async fn product(&self, id: Uuid) -> Result<Product> {
    self
      .store
      .get_product(id)
      .await
      .map_err(Into::<Error>::into)?
      .ok_or_else(|| Error::not_found(Collection::Products, id))
  }

  pub async fn create_product(&self, input: NewProduct) -> Result<Product> {
    input.validate()?;
    let product = self.store.create_product(input).await.map_err(Into::<Error>::into)?;
    debug!(product_id = %product.id, name = %product.name, "product created");
    Ok(product)
  }

  pub async fn update_product(&self, id: Uuid, patch: ProductPatch) -> Result<Product> {
    patch.validate()?;
    self
      .store
      .update_product(id, patch)
      .await
      .map_err(Into::<Error>::into)?
      .ok_or_else(|| Error::not_found(Collection::Products, id))
  }

  // ── Movements ─────────────────────────────────────────────────────────

  pub async fn list_movements(&self, filter: MovementFilter) -> Result<Vec<Movement>> {
    let mut movements = self.store.list_movements().await.map_err(Into::<Error>::into)?;
    movements.retain(|m| filter.matches(m));
    Ok(movements)
  }

  pub async fn movement(&self, id: Uuid) -> Result<Movement> {
    self
      .store
      .get_movement(id)
      .await
      .map_err(Into::<Error>::into)?
      .ok_or_else(|| Error::not_found(Collection::Movements, id))
  }

  /// Receive stock: append an inbound movement and raise the quantity.
  pub async fn record_inbound(&self, request: MovementRequest) -> Result<StockChange> {
    self.record(MovementKind::Inbound, request).await
  }

  /// Dispatch stock: append an outbound movement and lower the quantity.
  ///
  /// Rejected with [`Error::InsufficientStock`] if the product holds less
  /// than the requested quantity at the moment of the write.
  pub async fn record_outbound(&self, request: MovementRequest) -> Result<StockChange> {
    self.record(MovementKind::Outbound, request).await
  }

  async fn record(
    &self,
    kind: MovementKind,
    request: MovementRequest,
  ) -> Result<StockChange> {
    request.validate()?;
    let product_id = request.product_id;
    let quantity = request.quantity;

    let result = self
      .store
      .apply_movement(NewMovement::new(kind, request))
      .await
      .map_err(Into::<Error>::into);

    match &result {
      Ok(change) => info!(
        %product_id,
        movement_id = %change.movement.id,
        %kind,
        quantity,
        new_quantity = change.product.quantity,
        "stock movement recorded"
      ),
      Err(Error::InsufficientStock { available, .. }) => warn!(
        %product_id,
        requested = quantity,
        available,
        "outbound movement rejected"
      ),
      Err(e) => warn!(%product_id, %kind, error = %e, "stock movement failed"),
    }

    result
  }

  // ── Suppliers ─────────────────────────────────────────────────────────

  pub async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
    self.store.list_suppliers().await.map_err(Into::<Error>::into)
  }

  pub async fn supplier(&self, id: Uuid) -> Result<Supplier> {
    self
      .store
      .get_supplier(id)
      .await
      .map_err(Into::<Error>::into)?
      .ok_or_else(|| Error::not_found(Collection::Suppliers, id))
  }

  pub async fn create_supplier(&self, input: NewSupplier) -> Result<Supplier> {
    input.validate()?;
    self.store.create_supplier(input).await.map_err(Into::<Error>::into)
  }

  pub async fn update_supplier(
    &self,
    id: Uuid,
    patch: SupplierPatch,
  ) -> Result<Supplier> {
    patch.validate()?;
    self
      .store
      .update_supplier(id, patch)
      .await
      .map_err(Into::<Error>::into)?
      .ok_or_else(|| Error::not_found(Collection::Suppliers, id))
  }

  // ── Stats ─────────────────────────────────────────────────────────────

  /// Dashboard statistics for the current UTC day.
  pub async fn compute_stats(&self) -> Result<Stats> {
    self.compute_stats_on(Utc::now().date_naive()).await
  }

  pub async fn compute_stats_on(&self, today: NaiveDate) -> Result<Stats> {
    let products = self.store.list_products().await.map_err(Into::<Error>::into)?;
    let movements = self.store.list_movements().await.map_err(Into::<Error>::into)?;
    Ok(stats::compute(&products, &movements, today))
  }
}
