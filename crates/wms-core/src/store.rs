//! The `InventoryStore` trait — the persistence adapter.
//!
//! The trait is implemented by storage backends (`wms-store-sqlite` for
//! connected mode, `wms-store-local` for demo mode). The
//! [`Warehouse`](crate::Warehouse) service depends on this abstraction, not on
//! any concrete backend, and never branches on which one it was given.

use std::future::Future;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{
  movement::{Movement, NewMovement, StockChange},
  product::{NewProduct, Product, ProductPatch},
  supplier::{NewSupplier, Supplier, SupplierPatch},
};

// ─── Collections ─────────────────────────────────────────────────────────────

/// The named document collections every backend holds.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
  Products,
  Movements,
  Suppliers,
}

impl Collection {
  pub const ALL: [Collection; 3] =
    [Collection::Products, Collection::Movements, Collection::Suppliers];
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an inventory backend.
///
/// Product quantities change only through [`apply_movement`], which must
/// check availability, adjust the quantity and append the movement record as
/// one unit: either both writes land or neither does.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
///
/// [`apply_movement`]: InventoryStore::apply_movement
pub trait InventoryStore: Send + Sync {
  /// Backend error. Domain failures (`NotFound`, `InsufficientStock`) must
  /// survive the conversion into [`crate::Error`] unchanged.
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Products ──────────────────────────────────────────────────────────

  fn list_products(
    &self,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  /// Retrieve a product by id. Returns `None` if not found.
  fn get_product(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + '_;

  /// Persist a new product, assigning its id and timestamps.
  fn create_product(
    &self,
    input: NewProduct,
  ) -> impl Future<Output = Result<Product, Self::Error>> + Send + '_;

  /// Apply a descriptive edit. Returns `None` if the product does not exist.
  fn update_product(
    &self,
    id: Uuid,
    patch: ProductPatch,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + '_;

  // ── Movements — append-only ───────────────────────────────────────────

  /// All movements in recording order.
  fn list_movements(
    &self,
  ) -> impl Future<Output = Result<Vec<Movement>, Self::Error>> + Send + '_;

  fn get_movement(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Movement>, Self::Error>> + Send + '_;

  /// Atomically apply `input` to its product and append the movement.
  ///
  /// Fails with `NotFound` if the product does not exist, and with
  /// `InsufficientStock` if the resulting quantity would be negative. In
  /// both cases nothing is written.
  fn apply_movement(
    &self,
    input: NewMovement,
  ) -> impl Future<Output = Result<StockChange, Self::Error>> + Send + '_;

  // ── Suppliers ─────────────────────────────────────────────────────────

  fn list_suppliers(
    &self,
  ) -> impl Future<Output = Result<Vec<Supplier>, Self::Error>> + Send + '_;

  fn get_supplier(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Supplier>, Self::Error>> + Send + '_;

  fn create_supplier(
    &self,
    input: NewSupplier,
  ) -> impl Future<Output = Result<Supplier, Self::Error>> + Send + '_;

  fn update_supplier(
    &self,
    id: Uuid,
    patch: SupplierPatch,
  ) -> impl Future<Output = Result<Option<Supplier>, Self::Error>> + Send + '_;
}
