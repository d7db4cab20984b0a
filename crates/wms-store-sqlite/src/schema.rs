//! SQL schema for the warehouse SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS products (
    product_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    sku         TEXT,
    category    TEXT,
    quantity    INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
    price       REAL,
    min_stock   INTEGER NOT NULL DEFAULT 10,
    description TEXT,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC
    updated_at  TEXT NOT NULL
);

-- Movements are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS movements (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    movement_id   TEXT NOT NULL UNIQUE,
    product_id    TEXT NOT NULL REFERENCES products(product_id),
    product_name  TEXT,
    kind          TEXT NOT NULL,   -- 'inbound' | 'outbound'
    quantity      INTEGER NOT NULL CHECK (quantity > 0),
    reason        TEXT,
    status        TEXT NOT NULL DEFAULT 'completed',
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS suppliers (
    supplier_id TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    phone       TEXT,
    email       TEXT,
    address     TEXT,
    kind        TEXT NOT NULL DEFAULT 'supplier',   -- 'supplier' | 'customer'
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS movements_product_idx ON movements(product_id);
CREATE INDEX IF NOT EXISTS movements_created_idx ON movements(created_at);

PRAGMA user_version = 1;
";
