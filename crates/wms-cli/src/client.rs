//! Async HTTP client wrapping the warehouse JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;
use wms_core::{
  movement::{Movement, MovementFilter, MovementKind, MovementRequest, StockChange},
  product::{NewProduct, Product},
  stats::Stats,
  supplier::{NewSupplier, Supplier},
};

/// Listing envelope returned by the collection routes.
#[derive(Debug, Deserialize)]
struct Documents<T> {
  documents: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client for the warehouse REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }

  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let resp = self
      .client
      .get(self.url(path))
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;
    decode(resp, "GET", path).await
  }

  async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
    let resp = self
      .client
      .post(self.url(path))
      .json(body)
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;
    decode(resp, "POST", path).await
  }

  // ── Products ──────────────────────────────────────────────────────────────

  /// `GET /products`
  pub async fn list_products(&self) -> Result<Vec<Product>> {
    let list: Documents<Product> = self.get("/products").await?;
    Ok(list.documents)
  }

  /// `GET /products/{id}`
  pub async fn product(&self, id: Uuid) -> Result<Product> {
    self.get(&format!("/products/{id}")).await
  }

  /// `POST /products`
  pub async fn create_product(&self, input: &NewProduct) -> Result<Product> {
    self.post("/products", input).await
  }

  // ── Movements ─────────────────────────────────────────────────────────────

  /// `GET /movements[?type=…][&productId=…]`
  pub async fn list_movements(&self, filter: MovementFilter) -> Result<Vec<Movement>> {
    let list: Documents<Movement> = self.get(&movements_path(filter)).await?;
    Ok(list.documents)
  }

  /// `POST /movements/{inbound|outbound}`
  pub async fn record(
    &self,
    kind: MovementKind,
    request: &MovementRequest,
  ) -> Result<StockChange> {
    self.post(&format!("/movements/{kind}"), request).await
  }

  // ── Suppliers ─────────────────────────────────────────────────────────────

  /// `GET /suppliers`
  pub async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
    let list: Documents<Supplier> = self.get("/suppliers").await?;
    Ok(list.documents)
  }

  /// `POST /suppliers`
  pub async fn create_supplier(&self, input: &NewSupplier) -> Result<Supplier> {
    self.post("/suppliers", input).await
  }

  // ── Stats ─────────────────────────────────────────────────────────────────

  /// `GET /stats`
  pub async fn stats(&self) -> Result<Stats> { self.get("/stats").await }
}

/// Turn a response into `T`, or into the server's `error` message.
async fn decode<T: DeserializeOwned>(resp: Response, method: &str, path: &str) -> Result<T> {
  let status = resp.status();
  if status.is_success() {
    return resp
      .json()
      .await
      .with_context(|| format!("deserialising {method} {path} response"));
  }

  let text = resp.text().await.unwrap_or_default();
  match serde_json::from_str::<ErrorBody>(&text) {
    Ok(body) => Err(anyhow!("{method} {path} → {status}: {}", body.error)),
    Err(_) => Err(anyhow!("{method} {path} → {status}")),
  }
}

fn movements_path(filter: MovementFilter) -> String {
  let mut params = Vec::new();
  if let Some(kind) = filter.kind {
    params.push(format!("type={kind}"));
  }
  if let Some(id) = filter.product_id {
    params.push(format!("productId={id}"));
  }
  if params.is_empty() {
    "/movements".to_string()
  } else {
    format!("/movements?{}", params.join("&"))
  }
}
