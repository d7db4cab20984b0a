//! Products — the stock-keeping units whose quantity movements reconcile.
//!
//! `quantity` is owned by the movement reconciler. Direct edits go through
//! [`ProductPatch`], which has no quantity field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Threshold below which a product counts as low on stock when no explicit
/// `minStock` was given.
pub const DEFAULT_MIN_STOCK: i64 = 10;

fn default_min_stock() -> i64 { DEFAULT_MIN_STOCK }

/// A persisted product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id:          Uuid,
  pub name:        String,
  pub sku:         Option<String>,
  pub category:    Option<String>,
  #[serde(default)]
  pub quantity:    i64,
  pub price:       Option<f64>,
  #[serde(default = "default_min_stock")]
  pub min_stock:   i64,
  pub description: Option<String>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl Product {
  pub fn is_low_stock(&self) -> bool { self.quantity < self.min_stock }

  /// Apply a direct edit. Returns the product with `updated_at` bumped.
  pub fn apply_patch(mut self, patch: ProductPatch, now: DateTime<Utc>) -> Self {
    if let Some(name) = patch.trimmed_name() {
      self.name = name.to_owned();
    }
    if let Some(sku) = patch.sku {
      self.sku = Some(sku);
    }
    if let Some(category) = patch.category {
      self.category = Some(category);
    }
    if let Some(price) = patch.price {
      self.price = Some(price);
    }
    if let Some(min_stock) = patch.min_stock {
      self.min_stock = min_stock;
    }
    if let Some(description) = patch.description {
      self.description = Some(description);
    }
    self.updated_at = now;
    self
  }
}

/// Input for creating a product. The store assigns `id` and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
  pub name:        String,
  pub sku:         Option<String>,
  pub category:    Option<String>,
  #[serde(default)]
  pub quantity:    i64,
  pub price:       Option<f64>,
  pub min_stock:   Option<i64>,
  pub description: Option<String>,
}

impl NewProduct {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }

  pub fn with_quantity(mut self, quantity: i64) -> Self {
    self.quantity = quantity;
    self
  }

  pub fn validate(&self) -> Result<()> {
    validate_name(&self.name)?;
    if self.quantity < 0 {
      return Err(Error::Validation(format!(
        "quantity must not be negative, got {}",
        self.quantity
      )));
    }
    validate_price(self.price)?;
    validate_min_stock(self.min_stock)
  }

  /// Materialise the product with store-assigned identity.
  pub fn into_product(self, id: Uuid, now: DateTime<Utc>) -> Product {
    Product {
      id,
      name:        self.name.trim().to_owned(),
      sku:         self.sku,
      category:    self.category,
      quantity:    self.quantity,
      price:       self.price,
      min_stock:   self.min_stock.unwrap_or(DEFAULT_MIN_STOCK),
      description: self.description,
      created_at:  now,
      updated_at:  now,
    }
  }
}

/// A partial update of a product's descriptive fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
  pub name:        Option<String>,
  pub sku:         Option<String>,
  pub category:    Option<String>,
  pub price:       Option<f64>,
  pub min_stock:   Option<i64>,
  pub description: Option<String>,
}

impl ProductPatch {
  /// The new name with surrounding whitespace removed, if one was given.
  pub fn trimmed_name(&self) -> Option<&str> { self.name.as_deref().map(str::trim) }

  pub fn validate(&self) -> Result<()> {
    if let Some(name) = &self.name {
      validate_name(name)?;
    }
    validate_price(self.price)?;
    validate_min_stock(self.min_stock)
  }
}

fn validate_name(name: &str) -> Result<()> {
  if name.trim().is_empty() {
    return Err(Error::Validation("product name is required".into()));
  }
  Ok(())
}

fn validate_price(price: Option<f64>) -> Result<()> {
  match price {
    Some(p) if !p.is_finite() || p < 0.0 => Err(Error::Validation(format!(
      "price must be a non-negative number, got {p}"
    ))),
    _ => Ok(()),
  }
}

fn validate_min_stock(min_stock: Option<i64>) -> Result<()> {
  match min_stock {
    Some(m) if m < 0 => Err(Error::Validation(format!(
      "minStock must not be negative, got {m}"
    ))),
    _ => Ok(()),
  }
}
