//! Local key-value backend for the warehouse inventory store (demo mode).
//!
//! Each collection is one serialized JSON array under a `wms_<collection>`
//! key. Keys live either as files in a directory or in process memory.
//! Movements span two keys, so they are guarded by a write-ahead intent that
//! is rolled forward when the store is next opened.

mod kv;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use kv::{KeyValue, MemoryKv};
pub use store::{LocalStore, PendingMovement};
