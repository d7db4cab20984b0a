//! Error types for `wms-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::store::Collection;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{collection} entry not found: {id}")]
  NotFound { collection: Collection, id: Uuid },

  #[error(
    "insufficient stock for product {product_id}: {available} available, \
     {requested} requested"
  )]
  InsufficientStock {
    product_id: Uuid,
    available:  i64,
    requested:  i64,
  },

  #[error("validation error: {0}")]
  Validation(String),

  #[error("backend unavailable: {0}")]
  BackendUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// A multi-step write was interrupted and could not be completed. The
  /// stock figure and the movement log for `product_id` may disagree.
  #[error("inconsistent state for product {product_id}: {detail}")]
  Inconsistent { product_id: Uuid, detail: String },
}

impl Error {
  pub fn not_found(collection: Collection, id: Uuid) -> Self {
    Self::NotFound { collection, id }
  }

  pub fn backend(
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
  ) -> Self {
    Self::BackendUnavailable(err.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
