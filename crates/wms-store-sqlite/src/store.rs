//! [`SqliteStore`] — the SQLite implementation of [`InventoryStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::debug;
use uuid::Uuid;

use wms_core::{
  Collection, InventoryStore,
  movement::{Movement, NewMovement, StockChange},
  product::{NewProduct, Product, ProductPatch},
  supplier::{NewSupplier, Supplier, SupplierPatch},
};

use crate::{
  Error, Result,
  encode::{
    MOVEMENT_COLUMNS, PRODUCT_COLUMNS, RawMovement, RawProduct, RawSupplier,
    SUPPLIER_COLUMNS, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
};

/// What happened inside the movement transaction.
enum Applied {
  Done(RawProduct),
  MissingProduct,
  /// The row was left untouched; `available` is what it holds.
  Rejected { available: i64 },
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An inventory store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// run on the connection's single worker thread, so transactions never
/// interleave.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn select_product(&self, id: Uuid) -> Result<Option<Product>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawProduct> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = ?1"),
              rusqlite::params![id_str],
              RawProduct::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProduct::into_product).transpose()
  }

  async fn select_supplier(&self, id: Uuid) -> Result<Option<Supplier>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSupplier> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE supplier_id = ?1"),
              rusqlite::params![id_str],
              RawSupplier::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSupplier::into_supplier).transpose()
  }
}

// ─── InventoryStore impl ─────────────────────────────────────────────────────

impl InventoryStore for SqliteStore {
  type Error = Error;

  // ── Products ──────────────────────────────────────────────────────────────

  async fn list_products(&self) -> Result<Vec<Product>> {
    let raws: Vec<RawProduct> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawProduct::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProduct::into_product).collect()
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<Product>> {
    self.select_product(id).await
  }

  async fn create_product(&self, input: NewProduct) -> Result<Product> {
    let product = input.into_product(Uuid::new_v4(), Utc::now());

    let id_str      = encode_uuid(product.id);
    let name        = product.name.clone();
    let sku         = product.sku.clone();
    let category    = product.category.clone();
    let quantity    = product.quantity;
    let price       = product.price;
    let min_stock   = product.min_stock;
    let description = product.description.clone();
    let created_str = encode_dt(product.created_at);
    let updated_str = encode_dt(product.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO products ({PRODUCT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
          ),
          rusqlite::params![
            id_str,
            name,
            sku,
            category,
            quantity,
            price,
            min_stock,
            description,
            created_str,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(product)
  }

  async fn update_product(&self, id: Uuid, patch: ProductPatch) -> Result<Option<Product>> {
    let id_str      = encode_uuid(id);
    let name        = patch.trimmed_name().map(str::to_owned);
    let updated_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE products SET
             name        = COALESCE(?2, name),
             sku         = COALESCE(?3, sku),
             category    = COALESCE(?4, category),
             price       = COALESCE(?5, price),
             min_stock   = COALESCE(?6, min_stock),
             description = COALESCE(?7, description),
             updated_at  = ?8
           WHERE product_id = ?1",
          rusqlite::params![
            id_str,
            name,
            patch.sku,
            patch.category,
            patch.price,
            patch.min_stock,
            patch.description,
            updated_str,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.select_product(id).await
  }

  // ── Movements — append-only ───────────────────────────────────────────────

  async fn list_movements(&self) -> Result<Vec<Movement>> {
    let raws: Vec<RawMovement> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MOVEMENT_COLUMNS} FROM movements ORDER BY seq"
        ))?;
        let rows = stmt
          .query_map([], RawMovement::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMovement::into_movement).collect()
  }

  async fn get_movement(&self, id: Uuid) -> Result<Option<Movement>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawMovement> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {MOVEMENT_COLUMNS} FROM movements WHERE movement_id = ?1"),
              rusqlite::params![id_str],
              RawMovement::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMovement::into_movement).transpose()
  }

  async fn apply_movement(&self, input: NewMovement) -> Result<StockChange> {
    let movement_id = Uuid::new_v4();
    let now         = Utc::now();
    let product_id  = input.product_id;

    let movement_str = encode_uuid(movement_id);
    let product_str  = encode_uuid(product_id);
    let now_str      = encode_dt(now);
    let delta        = input.delta();
    let kind_str     = input.kind.as_ref().to_owned();
    let quantity     = input.quantity;
    let reason       = input.reason.clone();

    let applied = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Check and adjust in one statement; the row is untouched when the
        // result would go negative or past i64::MAX.
        let changed = tx.execute(
          "UPDATE products
           SET quantity = quantity + ?1, updated_at = ?2
           WHERE product_id = ?3
             AND quantity >= -?1
             AND (?1 <= 0 OR quantity <= 9223372036854775807 - ?1)",
          rusqlite::params![delta, now_str, product_str],
        )?;

        if changed == 0 {
          let available: Option<i64> = tx
            .query_row(
              "SELECT quantity FROM products WHERE product_id = ?1",
              rusqlite::params![product_str],
              |r| r.get(0),
            )
            .optional()?;
          return Ok(match available {
            Some(available) => Applied::Rejected { available },
            None => Applied::MissingProduct,
          });
        }

        let product = tx.query_row(
          &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = ?1"),
          rusqlite::params![product_str],
          RawProduct::from_row,
        )?;

        tx.execute(
          &format!(
            "INSERT INTO movements ({MOVEMENT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'completed', ?7)"
          ),
          rusqlite::params![
            movement_str,
            product_str,
            product.name,
            kind_str,
            quantity,
            reason,
            now_str,
          ],
        )?;

        tx.commit()?;
        Ok(Applied::Done(product))
      })
      .await?;

    match applied {
      Applied::Done(raw) => {
        let product = raw.into_product()?;
        let movement = input.into_movement(movement_id, &product.name, now);
        Ok(StockChange { movement, product })
      }
      Applied::MissingProduct => {
        Err(wms_core::Error::not_found(Collection::Products, product_id).into())
      }
      Applied::Rejected { available } => Err(
        input
          .apply_to(available)
          .err()
          .unwrap_or(wms_core::Error::InsufficientStock {
            product_id,
            available,
            requested: quantity,
          })
          .into(),
      ),
    }
  }

  // ── Suppliers ─────────────────────────────────────────────────────────────

  async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
    let raws: Vec<RawSupplier> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SUPPLIER_COLUMNS} FROM suppliers ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], RawSupplier::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSupplier::into_supplier).collect()
  }

  async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>> {
    self.select_supplier(id).await
  }

  async fn create_supplier(&self, input: NewSupplier) -> Result<Supplier> {
    let supplier = input.into_supplier(Uuid::new_v4(), Utc::now());

    let id_str      = encode_uuid(supplier.id);
    let name        = supplier.name.clone();
    let phone       = supplier.phone.clone();
    let email       = supplier.email.clone();
    let address     = supplier.address.clone();
    let kind_str    = supplier.kind.as_ref().to_owned();
    let created_str = encode_dt(supplier.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO suppliers ({SUPPLIER_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
          ),
          rusqlite::params![id_str, name, phone, email, address, kind_str, created_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(supplier)
  }

  async fn update_supplier(
    &self,
    id: Uuid,
    patch: SupplierPatch,
  ) -> Result<Option<Supplier>> {
    let id_str   = encode_uuid(id);
    let name     = patch.trimmed_name().map(str::to_owned);
    let kind_str = patch.kind.map(|k| k.as_ref().to_owned());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE suppliers SET
             name    = COALESCE(?2, name),
             phone   = COALESCE(?3, phone),
             email   = COALESCE(?4, email),
             address = COALESCE(?5, address),
             kind    = COALESCE(?6, kind)
           WHERE supplier_id = ?1",
          rusqlite::params![
            id_str,
            name,
            patch.phone,
            patch.email,
            patch.address,
            kind_str,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.select_supplier(id).await
  }
}
