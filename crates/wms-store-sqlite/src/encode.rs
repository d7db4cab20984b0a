//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. Enums are stored as their lowercase names.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use wms_core::{
  movement::{Movement, MovementKind, MovementStatus},
  product::Product,
  supplier::{PartnerKind, Supplier},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ────────────────────────────────────────────────────────────────────

fn decode_enum<T: FromStr>(field: &'static str, s: &str) -> Result<T> {
  s.parse().map_err(|_| Error::UnknownEnum { field, value: s.to_owned() })
}

// ─── Raw rows ─────────────────────────────────────────────────────────────────

pub const PRODUCT_COLUMNS: &str = "product_id, name, sku, category, quantity, \
                                   price, min_stock, description, created_at, \
                                   updated_at";

/// Intermediate row type for the `products` table.
pub struct RawProduct {
  pub product_id:  String,
  pub name:        String,
  pub sku:         Option<String>,
  pub category:    Option<String>,
  pub quantity:    i64,
  pub price:       Option<f64>,
  pub min_stock:   i64,
  pub description: Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawProduct {
  /// Map a row selected with [`PRODUCT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      product_id:  row.get(0)?,
      name:        row.get(1)?,
      sku:         row.get(2)?,
      category:    row.get(3)?,
      quantity:    row.get(4)?,
      price:       row.get(5)?,
      min_stock:   row.get(6)?,
      description: row.get(7)?,
      created_at:  row.get(8)?,
      updated_at:  row.get(9)?,
    })
  }

  pub fn into_product(self) -> Result<Product> {
    Ok(Product {
      id:          decode_uuid(&self.product_id)?,
      name:        self.name,
      sku:         self.sku,
      category:    self.category,
      quantity:    self.quantity,
      price:       self.price,
      min_stock:   self.min_stock,
      description: self.description,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const MOVEMENT_COLUMNS: &str = "movement_id, product_id, product_name, kind, \
                                    quantity, reason, status, created_at";

/// Intermediate row type for the `movements` table.
pub struct RawMovement {
  pub movement_id:  String,
  pub product_id:   String,
  pub product_name: Option<String>,
  pub kind:         String,
  pub quantity:     i64,
  pub reason:       Option<String>,
  pub status:       String,
  pub created_at:   String,
}

impl RawMovement {
  /// Map a row selected with [`MOVEMENT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      movement_id:  row.get(0)?,
      product_id:   row.get(1)?,
      product_name: row.get(2)?,
      kind:         row.get(3)?,
      quantity:     row.get(4)?,
      reason:       row.get(5)?,
      status:       row.get(6)?,
      created_at:   row.get(7)?,
    })
  }

  pub fn into_movement(self) -> Result<Movement> {
    Ok(Movement {
      id:           decode_uuid(&self.movement_id)?,
      product_id:   decode_uuid(&self.product_id)?,
      product_name: self.product_name,
      kind:         decode_enum::<MovementKind>("kind", &self.kind)?,
      quantity:     self.quantity,
      reason:       self.reason,
      status:       decode_enum::<MovementStatus>("status", &self.status)?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

pub const SUPPLIER_COLUMNS: &str =
  "supplier_id, name, phone, email, address, kind, created_at";

/// Intermediate row type for the `suppliers` table.
pub struct RawSupplier {
  pub supplier_id: String,
  pub name:        String,
  pub phone:       Option<String>,
  pub email:       Option<String>,
  pub address:     Option<String>,
  pub kind:        String,
  pub created_at:  String,
}

impl RawSupplier {
  /// Map a row selected with [`SUPPLIER_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      supplier_id: row.get(0)?,
      name:        row.get(1)?,
      phone:       row.get(2)?,
      email:       row.get(3)?,
      address:     row.get(4)?,
      kind:        row.get(5)?,
      created_at:  row.get(6)?,
    })
  }

  pub fn into_supplier(self) -> Result<Supplier> {
    Ok(Supplier {
      id:         decode_uuid(&self.supplier_id)?,
      name:       self.name,
      phone:      self.phone,
      email:      self.email,
      address:    self.address,
      kind:       decode_enum::<PartnerKind>("kind", &self.kind)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
