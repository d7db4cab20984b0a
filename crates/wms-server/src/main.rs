//! wms-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the backend
//! selected by `mode`, and serves the JSON API over HTTP.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wms_core::{InventoryStore, Warehouse};
use wms_store_local::LocalStore;
use wms_store_sqlite::SqliteStore;

use crate::settings::{ServerConfig, StoreMode, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "Warehouse inventory API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  match cfg.mode {
    StoreMode::Connected => {
      let path = expand_tilde(&cfg.database_path);
      let store = SqliteStore::open(&path)
        .await
        .with_context(|| format!("failed to open database at {path:?}"))?;
      tracing::info!(path = %path.display(), "connected mode");
      serve(store, &cfg).await
    }
    StoreMode::Demo => {
      let dir = expand_tilde(&cfg.local_store_dir);
      let store = LocalStore::open(&dir)
        .await
        .with_context(|| format!("failed to open local store at {dir:?}"))?;
      tracing::info!(dir = %dir.display(), "demo mode");
      serve(store, &cfg).await
    }
  }
}

async fn serve<S: InventoryStore + 'static>(
  store: S,
  cfg: &ServerConfig,
) -> anyhow::Result<()> {
  let app = wms_api::api_router(Arc::new(Warehouse::new(store)))
    .layer(TraceLayer::new_for_http());
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      let _ = tokio::signal::ctrl_c().await;
    })
    .await
    .context("server error")?;

  Ok(())
}
