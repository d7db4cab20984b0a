//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use wms_core::{
  Error as CoreError, InventoryStore, Warehouse,
  movement::{MovementFilter, MovementKind, MovementRequest, NewMovement},
  product::{NewProduct, ProductPatch},
  stats::Stats,
  supplier::{NewSupplier, PartnerKind, SupplierPatch},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn warehouse() -> Warehouse<SqliteStore> { Warehouse::new(store().await) }

// ─── Products ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_product() {
  let s = store().await;

  let mut input = NewProduct::new("Steel bolt M8");
  input.sku = Some("BOLT-M8".into());
  input.price = Some(0.35);
  let product = s.create_product(input).await.unwrap();
  assert_eq!(product.quantity, 0);
  assert_eq!(product.min_stock, 10);

  let fetched = s.get_product(product.id).await.unwrap().unwrap();
  assert_eq!(fetched, product);
}

#[tokio::test]
async fn get_product_missing_returns_none() {
  let s = store().await;
  assert!(s.get_product(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_products_in_creation_order() {
  let s = store().await;
  for name in ["A", "B", "C"] {
    s.create_product(NewProduct::new(name)).await.unwrap();
  }
  let names: Vec<_> = s
    .list_products()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.name)
    .collect();
  assert_eq!(names, ["A", "B", "C"]);
}

#[tokio::test]
async fn update_product_changes_only_given_fields() {
  let s = store().await;
  let product = s
    .create_product(NewProduct::new("Crate").with_quantity(4))
    .await
    .unwrap();

  let updated = s
    .update_product(product.id, ProductPatch {
      category: Some("packaging".into()),
      min_stock: Some(2),
      ..ProductPatch::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.name, "Crate");
  assert_eq!(updated.category.as_deref(), Some("packaging"));
  assert_eq!(updated.min_stock, 2);
  assert_eq!(updated.quantity, 4);
  assert!(updated.updated_at >= product.updated_at);
}

#[tokio::test]
async fn update_product_stores_trimmed_name() {
  let s = store().await;
  let product = s.create_product(NewProduct::new("Crate")).await.unwrap();

  let updated = s
    .update_product(product.id, ProductPatch {
      name: Some("  Wooden crate\n".into()),
      ..ProductPatch::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.name, "Wooden crate");
  assert_eq!(s.get_product(product.id).await.unwrap().unwrap().name, "Wooden crate");
}

#[tokio::test]
async fn update_missing_product_returns_none() {
  let s = store().await;
  let result = s
    .update_product(Uuid::new_v4(), ProductPatch::default())
    .await
    .unwrap();
  assert!(result.is_none());
}

// ─── apply_movement ──────────────────────────────────────────────────────────

#[tokio::test]
async fn apply_movement_adjusts_quantity_and_appends() {
  let s = store().await;
  let product = s.create_product(NewProduct::new("Pallet")).await.unwrap();

  let change = s
    .apply_movement(NewMovement::new(
      MovementKind::Inbound,
      MovementRequest::new(product.id, 7).with_reason("delivery"),
    ))
    .await
    .unwrap();

  assert_eq!(change.product.quantity, 7);
  assert_eq!(change.movement.product_name.as_deref(), Some("Pallet"));
  assert_eq!(change.movement.reason.as_deref(), Some("delivery"));

  let stored = s.get_movement(change.movement.id).await.unwrap().unwrap();
  assert_eq!(stored, change.movement);
}

#[tokio::test]
async fn apply_movement_unknown_product_is_not_found() {
  let s = store().await;
  let err = s
    .apply_movement(NewMovement::new(
      MovementKind::Inbound,
      MovementRequest::new(Uuid::new_v4(), 1),
    ))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::NotFound { .. })));
  assert!(s.list_movements().await.unwrap().is_empty());
}

#[tokio::test]
async fn apply_movement_short_stock_writes_nothing() {
  let s = store().await;
  let product = s
    .create_product(NewProduct::new("Pallet").with_quantity(2))
    .await
    .unwrap();

  let err = s
    .apply_movement(NewMovement::new(
      MovementKind::Outbound,
      MovementRequest::new(product.id, 3),
    ))
    .await
    .unwrap_err();

  assert!(matches!(
    err,
    Error::Core(CoreError::InsufficientStock { available: 2, requested: 3, .. })
  ));
  assert_eq!(s.get_product(product.id).await.unwrap().unwrap().quantity, 2);
  assert!(s.list_movements().await.unwrap().is_empty());
}

#[tokio::test]
async fn apply_movement_past_max_stock_writes_nothing() {
  let s = store().await;
  let product = s
    .create_product(NewProduct::new("Pallet").with_quantity(1))
    .await
    .unwrap();

  let err = s
    .apply_movement(NewMovement::new(
      MovementKind::Inbound,
      MovementRequest::new(product.id, i64::MAX),
    ))
    .await
    .unwrap_err();

  assert!(matches!(err, Error::Core(CoreError::Validation(_))));
  assert_eq!(s.get_product(product.id).await.unwrap().unwrap().quantity, 1);
  assert!(s.list_movements().await.unwrap().is_empty());

  // Exactly reaching the maximum is still allowed.
  let change = s
    .apply_movement(NewMovement::new(
      MovementKind::Inbound,
      MovementRequest::new(product.id, i64::MAX - 1),
    ))
    .await
    .unwrap();
  assert_eq!(change.product.quantity, i64::MAX);
}

// ─── Reconciliation through Warehouse ────────────────────────────────────────

#[tokio::test]
async fn outbound_then_rejection_then_inbound() {
  let w = warehouse().await;
  let a = w
    .create_product(NewProduct::new("A").with_quantity(5))
    .await
    .unwrap();

  let change = w.record_outbound(MovementRequest::new(a.id, 3)).await.unwrap();
  assert_eq!(change.product.quantity, 2);

  let err = w.record_outbound(MovementRequest::new(a.id, 3)).await.unwrap_err();
  assert!(matches!(err, CoreError::InsufficientStock { available: 2, .. }));
  assert_eq!(w.product(a.id).await.unwrap().quantity, 2);

  let change = w.record_inbound(MovementRequest::new(a.id, 10)).await.unwrap();
  assert_eq!(change.product.quantity, 12);

  let movements = w.list_movements(MovementFilter::default()).await.unwrap();
  assert_eq!(movements.len(), 2);
}

#[tokio::test]
async fn quantity_matches_movement_ledger() {
  let w = warehouse().await;
  let p = w.create_product(NewProduct::new("Ledger")).await.unwrap();

  let ops: [(MovementKind, i64); 8] = [
    (MovementKind::Inbound, 10),
    (MovementKind::Outbound, 4),
    (MovementKind::Outbound, 7), // rejected: 6 on hand
    (MovementKind::Inbound, 3),
    (MovementKind::Outbound, 9),
    (MovementKind::Outbound, 1), // rejected: 0 on hand
    (MovementKind::Inbound, 1),
    (MovementKind::Outbound, 1),
  ];

  let mut accepted = 0;
  for (kind, qty) in ops {
    let request = MovementRequest::new(p.id, qty);
    let result = match kind {
      MovementKind::Inbound => w.record_inbound(request).await,
      MovementKind::Outbound => w.record_outbound(request).await,
    };
    if result.is_ok() {
      accepted += 1;
    }
    assert!(w.product(p.id).await.unwrap().quantity >= 0);
  }

  let movements = w
    .list_movements(MovementFilter { kind: None, product_id: Some(p.id) })
    .await
    .unwrap();
  assert_eq!(movements.len(), accepted);
  assert_eq!(accepted, 6);

  let ledger: i64 = movements.iter().map(|m| m.delta()).sum();
  assert_eq!(w.product(p.id).await.unwrap().quantity, ledger);
  assert_eq!(ledger, 0);
}

#[tokio::test]
async fn non_positive_inbound_is_validation_error() {
  let w = warehouse().await;
  let p = w.create_product(NewProduct::new("Zero")).await.unwrap();

  for qty in [0, -5] {
    let err = w.record_inbound(MovementRequest::new(p.id, qty)).await.unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
  }
  assert!(w.list_movements(MovementFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_outbound_never_oversells() {
  let w = Arc::new(warehouse().await);
  let p = w
    .create_product(NewProduct::new("Hot item").with_quantity(10))
    .await
    .unwrap();

  let id = p.id;
  let mut tasks = tokio::task::JoinSet::new();
  for _ in 0..8 {
    let w = Arc::clone(&w);
    tasks.spawn(async move { w.record_outbound(MovementRequest::new(id, 3)).await });
  }

  let mut shipped = 0;
  while let Some(joined) = tasks.join_next().await {
    match joined.unwrap() {
      Ok(change) => shipped += change.movement.quantity,
      Err(CoreError::InsufficientStock { .. }) => {}
      Err(e) => panic!("unexpected error: {e}"),
    }
  }

  assert_eq!(shipped, 9);
  assert_eq!(w.product(p.id).await.unwrap().quantity, 1);
  assert_eq!(
    w.list_movements(MovementFilter::default()).await.unwrap().len(),
    3
  );
}

#[tokio::test]
async fn stats_reflect_todays_movements() {
  let w = warehouse().await;
  assert_eq!(w.compute_stats().await.unwrap(), Stats::default());

  let low = w.create_product(NewProduct::new("Low")).await.unwrap();
  let _full = w
    .create_product(NewProduct::new("Full").with_quantity(50))
    .await
    .unwrap();

  w.record_inbound(MovementRequest::new(low.id, 4)).await.unwrap();
  w.record_inbound(MovementRequest::new(low.id, 1)).await.unwrap();
  w.record_outbound(MovementRequest::new(low.id, 2)).await.unwrap();

  let stats = w.compute_stats_on(Utc::now().date_naive()).await.unwrap();
  assert_eq!(stats.total_products, 2);
  assert_eq!(stats.total_stock, 53);
  assert_eq!(stats.low_stock_count, 1);
  assert_eq!(stats.today_inbound, 2);
  assert_eq!(stats.today_outbound, 1);

  let yesterday = Utc::now().date_naive().pred_opt().unwrap();
  let stats = w.compute_stats_on(yesterday).await.unwrap();
  assert_eq!(stats.today_inbound, 0);
  assert_eq!(stats.today_outbound, 0);
}

// ─── Suppliers ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn supplier_create_update_list() {
  let s = store().await;
  let supplier = s
    .create_supplier(NewSupplier {
      name: "Acme Freight".into(),
      phone: Some("+1 555 0100".into()),
      ..NewSupplier::default()
    })
    .await
    .unwrap();
  assert_eq!(supplier.kind, PartnerKind::Supplier);

  let updated = s
    .update_supplier(supplier.id, SupplierPatch {
      kind: Some(PartnerKind::Customer),
      email: Some("ops@acme.example".into()),
      ..SupplierPatch::default()
    })
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.kind, PartnerKind::Customer);
  assert_eq!(updated.phone.as_deref(), Some("+1 555 0100"));

  let all = s.list_suppliers().await.unwrap();
  assert_eq!(all, vec![updated]);
}
