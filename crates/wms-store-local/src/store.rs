//! [`LocalStore`] — the key-value implementation of [`InventoryStore`].

use std::{fs::File, path::Path, sync::Arc};

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;
use tracing::{debug, error, warn};
use uuid::Uuid;

use wms_core::{
  Collection, InventoryStore,
  movement::{Movement, NewMovement, StockChange},
  product::{NewProduct, Product, ProductPatch},
  supplier::{NewSupplier, Supplier, SupplierPatch},
};

use crate::{Error, KeyValue, MemoryKv, Result};

/// Key holding the in-flight movement, if any.
const PENDING_KEY: &str = "wms_pending";

fn collection_key(collection: Collection) -> String { format!("wms_{collection}") }

/// A movement whose two writes (product, then movement log) have not both
/// been confirmed. Present only between the start and the end of
/// [`LocalStore::apply_movement`], or after an interruption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingMovement {
  pub movement: Movement,
  /// The product as it must look once the movement is applied.
  pub product:  Product,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An inventory store over a local key-value space.
///
/// Cloning is cheap — clones share one lock. Writers hold the lock
/// exclusively for the whole read-modify-write, so concurrent outbound
/// movements are serialised; readers share it and always see a settled
/// state.
#[derive(Clone)]
pub struct LocalStore {
  inner: Arc<Inner>,
}

struct Inner {
  kv:        KeyValue,
  lock:      RwLock<()>,
  /// Held open for the store's lifetime; see [`LocalStore::open`].
  _dir_lock: Option<File>,
}

impl LocalStore {
  /// Open (or create) a directory-backed store and finish any interrupted
  /// movement.
  ///
  /// The in-process lock only serialises writers sharing this handle, so the
  /// directory is also locked against other processes until every clone is
  /// dropped. A second open of a held directory fails with
  /// [`Error::Locked`].
  pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
    debug!(dir = %dir.as_ref().display(), "opening local store");
    Self::with_kv(KeyValue::dir(dir)).await
  }

  /// Open a store over process memory — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    Self::with_kv(KeyValue::Memory(MemoryKv::new())).await
  }

  pub async fn with_kv(kv: KeyValue) -> Result<Self> {
    kv.prepare().await?;
    let dir_lock = kv.lock()?;
    let store = Self {
      inner: Arc::new(Inner {
        kv,
        lock: RwLock::new(()),
        _dir_lock: dir_lock,
      }),
    };
    store.recover().await?;
    Ok(store)
  }

  /// The interrupted movement awaiting roll-forward, if any.
  pub async fn pending(&self) -> Result<Option<PendingMovement>> {
    let _guard = self.inner.lock.read().await;
    self.read_key(PENDING_KEY).await
  }

  /// Complete a movement left behind by an interrupted write.
  async fn recover(&self) -> Result<()> {
    let _guard = self.inner.lock.write().await;
    let Some(pending) = self.read_key::<PendingMovement>(PENDING_KEY).await? else {
      return Ok(());
    };

    warn!(
      product_id = %pending.product.id,
      movement_id = %pending.movement.id,
      "rolling forward interrupted stock movement"
    );
    self.roll_forward(&pending).await
  }

  /// Bring both collections in line with `pending` and clear the intent.
  /// Safe to repeat.
  async fn roll_forward(&self, pending: &PendingMovement) -> Result<()> {
    let mut products: Vec<Product> = self.load(Collection::Products).await?;
    if let Some(p) = products.iter_mut().find(|p| p.id == pending.product.id) {
      p.quantity = pending.product.quantity;
      p.updated_at = pending.product.updated_at;
    }
    self.save(Collection::Products, &products).await?;

    let mut movements: Vec<Movement> = self.load(Collection::Movements).await?;
    if !movements.iter().any(|m| m.id == pending.movement.id) {
      movements.push(pending.movement.clone());
      self.save(Collection::Movements, &movements).await?;
    }

    self.inner.kv.remove(PENDING_KEY).await?;
    Ok(())
  }

  async fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
    match self.inner.kv.get(key).await? {
      Some(raw) => serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| Error::Json { key: key.to_owned(), source }),
      None => Ok(None),
    }
  }

  async fn write_key<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)
      .map_err(|source| Error::Json { key: key.to_owned(), source })?;
    self.inner.kv.set(key, raw).await?;
    Ok(())
  }

  async fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
    Ok(
      self
        .read_key(&collection_key(collection))
        .await?
        .unwrap_or_default(),
    )
  }

  async fn save<T: Serialize>(&self, collection: Collection, docs: &[T]) -> Result<()> {
    self.write_key(&collection_key(collection), docs).await
  }

  async fn list<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
    let _guard = self.inner.lock.read().await;
    self.load(collection).await
  }

  /// Append `doc` to `collection` under the write lock.
  async fn append<T: Serialize + DeserializeOwned + Clone>(
    &self,
    collection: Collection,
    doc: T,
  ) -> Result<T> {
    let _guard = self.inner.lock.write().await;
    let mut docs: Vec<T> = self.load(collection).await?;
    docs.push(doc.clone());
    self.save(collection, &docs).await?;
    Ok(doc)
  }

  /// Replace the document selected by `find` with `edit(doc)`.
  async fn modify<T, F>(
    &self,
    collection: Collection,
    find: impl Fn(&T) -> bool,
    edit: F,
  ) -> Result<Option<T>>
  where
    T: Serialize + DeserializeOwned + Clone,
    F: FnOnce(T) -> T,
  {
    let _guard = self.inner.lock.write().await;
    let mut docs: Vec<T> = self.load(collection).await?;
    let Some(slot) = docs.iter_mut().find(|d| find(d)) else {
      return Ok(None);
    };
    *slot = edit(slot.clone());
    let updated = slot.clone();
    self.save(collection, &docs).await?;
    Ok(Some(updated))
  }

  /// The two writes of a movement, in order: products, then movements.
  async fn write_movement(
    &self,
    pending: &PendingMovement,
    mut products: Vec<Product>,
  ) -> Result<()> {
    if let Some(p) = products.iter_mut().find(|p| p.id == pending.product.id) {
      *p = pending.product.clone();
    }
    self.save(Collection::Products, &products).await?;

    let mut movements: Vec<Movement> = self.load(Collection::Movements).await?;
    movements.push(pending.movement.clone());
    self.save(Collection::Movements, &movements).await?;

    self.inner.kv.remove(PENDING_KEY).await?;
    Ok(())
  }
}

// ─── InventoryStore impl ─────────────────────────────────────────────────────

impl InventoryStore for LocalStore {
  type Error = Error;

  // ── Products ──────────────────────────────────────────────────────────────

  async fn list_products(&self) -> Result<Vec<Product>> {
    self.list(Collection::Products).await
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<Product>> {
    let products: Vec<Product> = self.list(Collection::Products).await?;
    Ok(products.into_iter().find(|p| p.id == id))
  }

  async fn create_product(&self, input: NewProduct) -> Result<Product> {
    let product = input.into_product(Uuid::new_v4(), Utc::now());
    self.append(Collection::Products, product).await
  }

  async fn update_product(&self, id: Uuid, patch: ProductPatch) -> Result<Option<Product>> {
    let now = Utc::now();
    self
      .modify(
        Collection::Products,
        |p: &Product| p.id == id,
        |p| p.apply_patch(patch, now),
      )
      .await
  }

  // ── Movements — append-only ───────────────────────────────────────────────

  async fn list_movements(&self) -> Result<Vec<Movement>> {
    self.list(Collection::Movements).await
  }

  async fn get_movement(&self, id: Uuid) -> Result<Option<Movement>> {
    let movements: Vec<Movement> = self.list(Collection::Movements).await?;
    Ok(movements.into_iter().find(|m| m.id == id))
  }

  async fn apply_movement(&self, input: NewMovement) -> Result<StockChange> {
    let _guard = self.inner.lock.write().await;
    let product_id = input.product_id;

    let products: Vec<Product> = self.load(Collection::Products).await?;
    let current = products
      .iter()
      .find(|p| p.id == product_id)
      .ok_or_else(|| wms_core::Error::not_found(Collection::Products, product_id))?;

    let quantity = input.apply_to(current.quantity)?;

    let now = Utc::now();
    let mut product = current.clone();
    product.quantity = quantity;
    product.updated_at = now;
    let movement = input.into_movement(Uuid::new_v4(), &product.name, now);
    let pending = PendingMovement { movement, product };

    // Nothing has changed yet if the intent cannot be recorded.
    self.write_key(PENDING_KEY, &pending).await?;

    if let Err(first) = self.write_movement(&pending, products).await {
      warn!(%product_id, error = %first, "movement write interrupted; retrying");
      if let Err(second) = self.roll_forward(&pending).await {
        error!(%product_id, error = %second, "movement left pending");
        return Err(
          wms_core::Error::Inconsistent {
            product_id,
            detail: format!(
              "movement {} is pending roll-forward: {second}",
              pending.movement.id
            ),
          }
          .into(),
        );
      }
    }

    let PendingMovement { movement, product } = pending;
    Ok(StockChange { movement, product })
  }

  // ── Suppliers ─────────────────────────────────────────────────────────────

  async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
    self.list(Collection::Suppliers).await
  }

  async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>> {
    let suppliers: Vec<Supplier> = self.list(Collection::Suppliers).await?;
    Ok(suppliers.into_iter().find(|s| s.id == id))
  }

  async fn create_supplier(&self, input: NewSupplier) -> Result<Supplier> {
    let supplier = input.into_supplier(Uuid::new_v4(), Utc::now());
    self.append(Collection::Suppliers, supplier).await
  }

  async fn update_supplier(
    &self,
    id: Uuid,
    patch: SupplierPatch,
  ) -> Result<Option<Supplier>> {
    self
      .modify(
        Collection::Suppliers,
        |s: &Supplier| s.id == id,
        |s| s.apply_patch(patch),
      )
      .await
  }
}
