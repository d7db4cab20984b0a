//! Server configuration: an optional TOML file overlaid by `WMS_*`
//! environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Which backend the process runs against. Chosen once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
  /// SQLite database at `database_path`.
  #[default]
  Connected,
  /// Local key-value store under `local_store_dir`.
  Demo,
}

/// Runtime server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub mode:            StoreMode,
  pub database_path:   PathBuf,
  pub local_store_dir: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            "127.0.0.1".to_string(),
      port:            8080,
      mode:            StoreMode::default(),
      database_path:   PathBuf::from("wms.sqlite3"),
      local_store_dir: PathBuf::from("wms-data"),
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists), then `WMS_*` variables, over the defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::from_sources(path, config::Environment::with_prefix("WMS"))
  }

  fn from_sources(
    path: &Path,
    env: config::Environment,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn no_env() -> config::Environment {
    config::Environment::with_prefix("WMS").source(Some(HashMap::new()))
  }

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = ServerConfig::from_sources(Path::new("does-not-exist.toml"), no_env())
      .unwrap();
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.address(), "127.0.0.1:8080");
  }

  #[test]
  fn file_and_env_layer_over_defaults() {
    let path = std::env::temp_dir().join(format!("wms-{}.toml", uuid::Uuid::new_v4()));
    std::fs::write(&path, "port = 9000\nmode = \"demo\"\nlocal_store_dir = \"/tmp/wms\"\n")
      .unwrap();

    let env = config::Environment::with_prefix("WMS").source(Some(HashMap::from([(
      "WMS_HOST".to_string(),
      "0.0.0.0".to_string(),
    )])));
    let cfg = ServerConfig::from_sources(&path, env).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.mode, StoreMode::Demo);
    assert_eq!(cfg.local_store_dir, PathBuf::from("/tmp/wms"));
    assert_eq!(cfg.database_path, PathBuf::from("wms.sqlite3"));
  }

  #[test]
  fn tilde_expands_only_as_prefix() {
    assert_eq!(expand_tilde(Path::new("data/~/x")), PathBuf::from("data/~/x"));
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(expand_tilde(Path::new("~/wms")), PathBuf::from(home).join("wms"));
    }
  }
}
