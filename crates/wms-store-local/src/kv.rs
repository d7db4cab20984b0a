//! The string key-value layer underneath [`LocalStore`](crate::LocalStore).
//!
//! Directory-backed keys are written to a temporary file and renamed into
//! place, so a single key is never observed half-written. A directory is
//! held by one store at a time through an advisory lock on its `LOCK` file.

use std::{
  collections::HashMap,
  fs::{File, OpenOptions},
  io,
  path::{Path, PathBuf},
  sync::{Arc, Mutex, PoisonError},
};

use fs2::FileExt;

use crate::{Error, Result};

/// Process-local key-value map. Clones share the same contents, which lets a
/// test reopen a store over the state a previous instance left behind.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
  entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKv {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, key: &str) -> Option<String> {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .get(key)
      .cloned()
  }

  pub fn set(&self, key: &str, value: String) {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(key.to_owned(), value);
  }

  pub fn remove(&self, key: &str) {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .remove(key);
  }
}

/// Where the keys live.
#[derive(Debug, Clone)]
pub enum KeyValue {
  /// One `<key>.json` file per key inside the directory.
  Dir(PathBuf),
  Memory(MemoryKv),
}

impl KeyValue {
  pub fn dir(path: impl AsRef<Path>) -> Self { Self::Dir(path.as_ref().to_path_buf()) }

  pub(crate) async fn prepare(&self) -> io::Result<()> {
    match self {
      Self::Dir(dir) => tokio::fs::create_dir_all(dir).await,
      Self::Memory(_) => Ok(()),
    }
  }

  /// Take the exclusive lock on a directory. The lock lasts as long as the
  /// returned file is open; memory keys need none.
  pub(crate) fn lock(&self) -> Result<Option<File>> {
    let Self::Dir(dir) = self else {
      return Ok(None);
    };
    let file = OpenOptions::new()
      .create(true)
      .truncate(false)
      .write(true)
      .open(dir.join("LOCK"))?;
    file
      .try_lock_exclusive()
      .map_err(|_| Error::Locked(dir.clone()))?;
    Ok(Some(file))
  }

  pub(crate) async fn get(&self, key: &str) -> io::Result<Option<String>> {
    match self {
      Self::Dir(dir) => match tokio::fs::read_to_string(key_path(dir, key)).await {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
      },
      Self::Memory(kv) => Ok(kv.get(key)),
    }
  }

  pub(crate) async fn set(&self, key: &str, value: String) -> io::Result<()> {
    match self {
      Self::Dir(dir) => {
        let path = key_path(dir, key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await
      }
      Self::Memory(kv) => {
        kv.set(key, value);
        Ok(())
      }
    }
  }

  pub(crate) async fn remove(&self, key: &str) -> io::Result<()> {
    match self {
      Self::Dir(dir) => match tokio::fs::remove_file(key_path(dir, key)).await {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
      },
      Self::Memory(kv) => {
        kv.remove(key);
        Ok(())
      }
    }
  }
}

fn key_path(dir: &Path, key: &str) -> PathBuf { dir.join(format!("{key}.json")) }
