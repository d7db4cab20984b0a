//! Error type for `wms-store-local`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain failure (missing product, insufficient stock, interrupted
  /// write that could not be completed).
  #[error(transparent)]
  Core(#[from] wms_core::Error),

  /// Another process has the directory open.
  #[error("store directory {0} is locked by another process")]
  Locked(PathBuf),

  #[error("storage i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error in key {key:?}: {source}")]
  Json {
    key:    String,
    #[source]
    source: serde_json::Error,
  },
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
