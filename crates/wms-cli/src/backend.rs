//! The inventory the CLI operates on: the remote server, or a local store in
//! demo mode. Chosen once at startup; commands never branch on it.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;
use wms_core::{
  Warehouse,
  movement::{Movement, MovementFilter, MovementKind, MovementRequest, StockChange},
  product::{NewProduct, Product},
  stats::Stats,
  supplier::{NewSupplier, Supplier},
};
use wms_store_local::LocalStore;

use crate::client::ApiClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  /// Talk to a running wms-server.
  #[default]
  Connected,
  /// Work against a local data directory, no server needed.
  Demo,
}

pub enum Backend {
  Remote(ApiClient),
  Demo(Warehouse<LocalStore>),
}

impl Backend {
  pub fn remote(base_url: &str) -> Result<Self> { Ok(Self::Remote(ApiClient::new(base_url)?)) }

  pub async fn demo(dir: &Path) -> Result<Self> {
    let store = LocalStore::open(dir)
      .await
      .with_context(|| format!("opening local store at {}", dir.display()))?;
    warn!(dir = %dir.display(), "running in demo mode against local data");
    Ok(Self::Demo(Warehouse::new(store)))
  }

  pub async fn list_products(&self) -> Result<Vec<Product>> {
    match self {
      Self::Remote(client) => client.list_products().await,
      Self::Demo(w) => Ok(w.list_products().await?),
    }
  }

  pub async fn product(&self, id: Uuid) -> Result<Product> {
    match self {
      Self::Remote(client) => client.product(id).await,
      Self::Demo(w) => Ok(w.product(id).await?),
    }
  }

  pub async fn create_product(&self, input: NewProduct) -> Result<Product> {
    match self {
      Self::Remote(client) => client.create_product(&input).await,
      Self::Demo(w) => Ok(w.create_product(input).await?),
    }
  }

  pub async fn list_movements(&self, filter: MovementFilter) -> Result<Vec<Movement>> {
    match self {
      Self::Remote(client) => client.list_movements(filter).await,
      Self::Demo(w) => Ok(w.list_movements(filter).await?),
    }
  }

  pub async fn record(
    &self,
    kind: MovementKind,
    request: MovementRequest,
  ) -> Result<StockChange> {
    match self {
      Self::Remote(client) => client.record(kind, &request).await,
      Self::Demo(w) => Ok(match kind {
        MovementKind::Inbound => w.record_inbound(request).await?,
        MovementKind::Outbound => w.record_outbound(request).await?,
      }),
    }
  }

  pub async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
    match self {
      Self::Remote(client) => client.list_suppliers().await,
      Self::Demo(w) => Ok(w.list_suppliers().await?),
    }
  }

  pub async fn create_supplier(&self, input: NewSupplier) -> Result<Supplier> {
    match self {
      Self::Remote(client) => client.create_supplier(&input).await,
      Self::Demo(w) => Ok(w.create_supplier(input).await?),
    }
  }

  pub async fn stats(&self) -> Result<Stats> {
    match self {
      Self::Remote(client) => client.stats().await,
      Self::Demo(w) => Ok(w.compute_stats().await?),
    }
  }
}

#[cfg(test)]
mod tests {
  use wms_core::Error as CoreError;

  use super::*;

  async fn demo() -> Backend {
    Backend::Demo(Warehouse::new(LocalStore::open_in_memory().await.unwrap()))
  }

  #[tokio::test]
  async fn demo_backend_records_movements() {
    let backend = demo().await;
    let p = backend
      .create_product(NewProduct::new("Widget").with_quantity(4))
      .await
      .unwrap();

    let change = backend
      .record(MovementKind::Outbound, MovementRequest::new(p.id, 3))
      .await
      .unwrap();
    assert_eq!(change.product.quantity, 1);

    let err = backend
      .record(MovementKind::Outbound, MovementRequest::new(p.id, 3))
      .await
      .unwrap_err();
    assert!(matches!(
      err.downcast_ref::<CoreError>(),
      Some(CoreError::InsufficientStock { .. })
    ));

    let stats = backend.stats().await.unwrap();
    assert_eq!(stats.total_stock, 1);
    assert_eq!(stats.today_outbound, 1);
  }
}
