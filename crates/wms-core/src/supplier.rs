//! Suppliers and customers — trading partners kept alongside the inventory.
//!
//! Not involved in stock reconciliation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PartnerKind {
  #[default]
  Supplier,
  Customer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
  pub id:         Uuid,
  pub name:       String,
  pub phone:      Option<String>,
  pub email:      Option<String>,
  pub address:    Option<String>,
  #[serde(rename = "type", default)]
  pub kind:       PartnerKind,
  pub created_at: DateTime<Utc>,
}

impl Supplier {
  pub fn apply_patch(mut self, patch: SupplierPatch) -> Self {
    if let Some(name) = patch.trimmed_name() {
      self.name = name.to_owned();
    }
    if let Some(phone) = patch.phone {
      self.phone = Some(phone);
    }
    if let Some(email) = patch.email {
      self.email = Some(email);
    }
    if let Some(address) = patch.address {
      self.address = Some(address);
    }
    if let Some(kind) = patch.kind {
      self.kind = kind;
    }
    self
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
  pub name:    String,
  pub phone:   Option<String>,
  pub email:   Option<String>,
  pub address: Option<String>,
  #[serde(rename = "type", default)]
  pub kind:    PartnerKind,
}

impl NewSupplier {
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::Validation("supplier name is required".into()));
    }
    Ok(())
  }

  pub fn into_supplier(self, id: Uuid, now: DateTime<Utc>) -> Supplier {
    Supplier {
      id,
      name: self.name.trim().to_owned(),
      phone: self.phone,
      email: self.email,
      address: self.address,
      kind: self.kind,
      created_at: now,
    }
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPatch {
  pub name:    Option<String>,
  pub phone:   Option<String>,
  pub email:   Option<String>,
  pub address: Option<String>,
  #[serde(rename = "type")]
  pub kind:    Option<PartnerKind>,
}

impl SupplierPatch {
  /// The new name with surrounding whitespace removed, if one was given.
  pub fn trimmed_name(&self) -> Option<&str> { self.name.as_deref().map(str::trim) }

  pub fn validate(&self) -> Result<()> {
    match &self.name {
      Some(name) if name.trim().is_empty() => {
        Err(Error::Validation("supplier name is required".into()))
      }
      _ => Ok(()),
    }
  }
}
