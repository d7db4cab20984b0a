//! Router tests against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;
use wms_core::Warehouse;
use wms_store_sqlite::SqliteStore;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(Warehouse::new(store)))
}

async fn send(
  app: &Router,
  method: Method,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

async fn create_product(app: &Router, name: &str, quantity: i64) -> Value {
  let (status, body) = send(
    app,
    Method::POST,
    "/products",
    Some(json!({ "name": name, "quantity": quantity })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED, "{body}");
  body
}

// ── Products ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_list_products() {
  let app = app().await;
  let created = create_product(&app, "Carton", 4).await;
  assert_eq!(created["minStock"], 10);
  assert!(created["createdAt"].is_string());

  let (status, body) = send(&app, Method::GET, "/products", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["total"], 1);
  assert_eq!(body["documents"][0]["name"], "Carton");
}

#[tokio::test]
async fn blank_product_name_is_400() {
  let app = app().await;
  let (status, body) = send(
    &app,
    Method::POST,
    "/products",
    Some(json!({ "name": "   " })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);
  assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_is_400_with_error_body() {
  let app = app().await;
  let req = Request::builder()
    .method(Method::POST)
    .uri("/products")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{\"name\": "))
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_product_is_404() {
  let app = app().await;
  let (status, body) =
    send(&app, Method::GET, &format!("/products/{}", Uuid::new_v4()), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["success"], false);
}

#[tokio::test]
async fn invalid_id_is_400() {
  let app = app().await;
  let (status, body) = send(&app, Method::GET, "/products/not-a-uuid", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);
}

#[tokio::test]
async fn patch_ignores_quantity() {
  let app = app().await;
  let created = create_product(&app, "Tape", 3).await;
  let id = created["id"].as_str().unwrap();

  let (status, body) = send(
    &app,
    Method::PATCH,
    &format!("/products/{id}"),
    Some(json!({ "category": "packaging", "quantity": 999 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["category"], "packaging");
  assert_eq!(body["quantity"], 3);
}

// ── Movements ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn outbound_inbound_flow() {
  let app = app().await;
  let product = create_product(&app, "A", 5).await;
  let id = product["id"].as_str().unwrap();

  let (status, body) = send(
    &app,
    Method::POST,
    "/movements/outbound",
    Some(json!({ "productId": id, "quantity": 3, "reason": "order 17" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  assert_eq!(body["product"]["quantity"], 2);
  assert_eq!(body["movement"]["type"], "outbound");
  assert_eq!(body["movement"]["productName"], "A");
  assert_eq!(body["movement"]["status"], "completed");

  let (status, body) = send(
    &app,
    Method::POST,
    "/movements/outbound",
    Some(json!({ "productId": id, "quantity": 3 })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);
  assert!(body["error"].as_str().unwrap().contains("insufficient stock"));

  let (status, body) = send(
    &app,
    Method::POST,
    "/movements/inbound",
    Some(json!({ "productId": id, "quantity": 10 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["product"]["quantity"], 12);

  let (_, body) = send(&app, Method::GET, "/movements", None).await;
  assert_eq!(body["total"], 2);

  let (_, body) = send(&app, Method::GET, "/movements?type=inbound", None).await;
  assert_eq!(body["total"], 1);
  assert_eq!(body["documents"][0]["quantity"], 10);
}

#[tokio::test]
async fn zero_quantity_inbound_is_400() {
  let app = app().await;
  let product = create_product(&app, "B", 0).await;

  let (status, body) = send(
    &app,
    Method::POST,
    "/movements/inbound",
    Some(json!({ "productId": product["id"], "quantity": 0 })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);

  let (_, body) = send(&app, Method::GET, "/movements", None).await;
  assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn movement_for_unknown_product_is_404() {
  let app = app().await;
  let (status, _) = send(
    &app,
    Method::POST,
    "/movements/inbound",
    Some(json!({ "productId": Uuid::new_v4(), "quantity": 1 })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_movement_by_id() {
  let app = app().await;
  let product = create_product(&app, "C", 0).await;
  let (_, recorded) = send(
    &app,
    Method::POST,
    "/movements/inbound",
    Some(json!({ "productId": product["id"], "quantity": 2 })),
  )
  .await;
  let movement_id = recorded["movement"]["id"].as_str().unwrap();

  let (status, body) =
    send(&app, Method::GET, &format!("/movements/{movement_id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, recorded["movement"]);
}

// ── Suppliers ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn supplier_create_and_patch() {
  let app = app().await;
  let (status, created) = send(
    &app,
    Method::POST,
    "/suppliers",
    Some(json!({ "name": "Acme", "email": "sales@acme.example" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["type"], "supplier");

  let id = created["id"].as_str().unwrap();
  let (status, body) = send(
    &app,
    Method::PATCH,
    &format!("/suppliers/{id}"),
    Some(json!({ "type": "customer" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["type"], "customer");
  assert_eq!(body["email"], "sales@acme.example");

  let (_, body) = send(&app, Method::GET, "/suppliers", None).await;
  assert_eq!(body["total"], 1);
}

// ── Stats & fallback ─────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_stats_are_zero() {
  let app = app().await;
  let (status, body) = send(&app, Method::GET, "/stats", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    body,
    json!({
      "totalProducts": 0,
      "totalStock": 0,
      "lowStockCount": 0,
      "todayInbound": 0,
      "todayOutbound": 0,
    })
  );
}

#[tokio::test]
async fn stats_count_todays_movements() {
  let app = app().await;
  let product = create_product(&app, "D", 20).await;
  send(
    &app,
    Method::POST,
    "/movements/outbound",
    Some(json!({ "productId": product["id"], "quantity": 15 })),
  )
  .await;

  let (_, body) = send(&app, Method::GET, "/stats", None).await;
  assert_eq!(body["totalProducts"], 1);
  assert_eq!(body["totalStock"], 5);
  assert_eq!(body["lowStockCount"], 1);
  assert_eq!(body["todayOutbound"], 1);
}

#[tokio::test]
async fn unknown_route_describes_api() {
  let app = app().await;
  let (status, body) = send(&app, Method::GET, "/nowhere", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "WMS API v1.0");
  assert!(body["endpoints"].as_array().unwrap().len() > 5);
}

#[tokio::test]
async fn unsupported_method_describes_api() {
  let app = app().await;
  for (method, uri) in [
    (Method::DELETE, "/products"),
    (Method::GET, "/movements/inbound"),
    (Method::PUT, "/stats"),
  ] {
    let (status, body) = send(&app, method, uri, None).await;
    assert_eq!(status, StatusCode::OK, "{uri}");
    assert_eq!(body["message"], "WMS API v1.0", "{uri}");
  }
}

#[tokio::test]
async fn inbound_past_max_stock_is_400() {
  let app = app().await;
  let product = create_product(&app, "E", 1).await;
  let (status, body) = send(
    &app,
    Method::POST,
    "/movements/inbound",
    Some(json!({ "productId": product["id"], "quantity": i64::MAX })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);

  let uri = format!("/products/{}", product["id"].as_str().unwrap());
  let (_, body) = send(&app, Method::GET, &uri, None).await;
  assert_eq!(body["quantity"], 1);
}
