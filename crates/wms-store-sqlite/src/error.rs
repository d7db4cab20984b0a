//! Error type for `wms-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain failure (missing product, insufficient stock).
  #[error(transparent)]
  Core(#[from] wms_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown {field} value in database: {value:?}")]
  UnknownEnum { field: &'static str, value: String },
}

impl From<Error> for wms_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Core(e) => e,
      other => wms_core::Error::backend(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
