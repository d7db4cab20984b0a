//! Stock movements — the append-only audit log of quantity changes.
//!
//! A movement is never updated or deleted once recorded. Every successful
//! inbound or outbound operation produces exactly one movement; rejected
//! operations produce none.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result, product::Product};

/// Direction of a movement.
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
pub enum MovementKind {
  Inbound,
  Outbound,
}

impl MovementKind {
  /// The signed change this movement applies to a product's quantity.
  pub fn delta(self, quantity: i64) -> i64 {
    match self {
      Self::Inbound => quantity,
      Self::Outbound => -quantity,
    }
  }
}

/// Processing status. Every recorded movement is `Completed`; there is no
/// cancellation or reversal path.
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
pub enum MovementStatus {
  #[default]
  Completed,
}

/// A recorded movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
  pub id:           Uuid,
  pub product_id:   Uuid,
  /// Copy of the product's name at the time the movement was recorded.
  pub product_name: Option<String>,
  #[serde(rename = "type")]
  pub kind:         MovementKind,
  pub quantity:     i64,
  pub reason:       Option<String>,
  #[serde(default)]
  pub status:       MovementStatus,
  pub created_at:   DateTime<Utc>,
}

impl Movement {
  pub fn delta(&self) -> i64 { self.kind.delta(self.quantity) }
}

/// A caller's request to move stock in or out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRequest {
  pub product_id: Uuid,
  pub quantity:   i64,
  #[serde(default)]
  pub reason:     Option<String>,
}

impl MovementRequest {
  pub fn new(product_id: Uuid, quantity: i64) -> Self {
    Self { product_id, quantity, reason: None }
  }

  pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
    self.reason = Some(reason.into());
    self
  }

  pub fn validate(&self) -> Result<()> {
    if self.quantity <= 0 {
      return Err(Error::Validation(format!(
        "quantity must be a positive integer, got {}",
        self.quantity
      )));
    }
    Ok(())
  }
}

/// A validated movement handed to the store for atomic application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
  pub product_id: Uuid,
  pub kind:       MovementKind,
  pub quantity:   i64,
  pub reason:     Option<String>,
}

impl NewMovement {
  pub fn new(kind: MovementKind, request: MovementRequest) -> Self {
    Self {
      product_id: request.product_id,
      kind,
      quantity: request.quantity,
      reason: request.reason,
    }
  }

  pub fn delta(&self) -> i64 { self.kind.delta(self.quantity) }

  /// The quantity `on_hand` becomes once this movement is applied.
  ///
  /// Fails with [`Error::InsufficientStock`] below zero and with
  /// [`Error::Validation`] past `i64::MAX`.
  pub fn apply_to(&self, on_hand: i64) -> Result<i64> {
    match on_hand.checked_add(self.delta()) {
      Some(q) if q >= 0 => Ok(q),
      Some(_) => Err(Error::InsufficientStock {
        product_id: self.product_id,
        available:  on_hand,
        requested:  self.quantity,
      }),
      None => Err(Error::Validation(format!(
        "receiving {} would exceed the maximum stock of {} (on hand: {on_hand})",
        self.quantity,
        i64::MAX
      ))),
    }
  }

  /// Materialise the movement against the product it applies to.
  pub fn into_movement(
    self,
    id: Uuid,
    product_name: &str,
    now: DateTime<Utc>,
  ) -> Movement {
    Movement {
      id,
      product_id: self.product_id,
      product_name: Some(product_name.to_owned()),
      kind: self.kind,
      quantity: self.quantity,
      reason: self.reason,
      status: MovementStatus::Completed,
      created_at: now,
    }
  }
}

/// The outcome of an applied movement: the appended record and the product
/// with its adjusted quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockChange {
  pub movement: Movement,
  pub product:  Product,
}

/// Filter for listing movements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementFilter {
  #[serde(rename = "type")]
  pub kind:       Option<MovementKind>,
  pub product_id: Option<Uuid>,
}

impl MovementFilter {
  pub fn matches(&self, movement: &Movement) -> bool {
    self.kind.is_none_or(|k| k == movement.kind)
      && self.product_id.is_none_or(|id| id == movement.product_id)
  }
}
