//! SQL schema for the Pressroom SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Quantity columns carry `NOT NULL DEFAULT 0` so a missing number reads
/// back as 0 — the coercion convention the domain layer relies on. Money
/// columns are canonical decimal strings; REAL would lose cents.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS materials (
    material_id        TEXT PRIMARY KEY,
    name               TEXT NOT NULL,
    category           TEXT,
    unit               TEXT NOT NULL,
    current_quantity   REAL NOT NULL DEFAULT 0,
    reorder_threshold  REAL NOT NULL DEFAULT 0,
    unit_cost          TEXT NOT NULL DEFAULT '0',
    supplier           TEXT,
    created_at         TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at         TEXT NOT NULL
);

-- Usage events are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS usage_events (
    event_id           TEXT PRIMARY KEY,
    material_id        TEXT NOT NULL REFERENCES materials(material_id),
    quantity_consumed  REAL NOT NULL DEFAULT 0,
    occurred_at        TEXT NOT NULL,
    note               TEXT
);

-- Restocks are ledgered separately from consumption so the usage
-- aggregate never sees them. Append-only, like usage_events.
CREATE TABLE IF NOT EXISTS restock_events (
    restock_id      TEXT PRIMARY KEY,
    material_id     TEXT NOT NULL REFERENCES materials(material_id),
    quantity_added  REAL NOT NULL DEFAULT 0,
    occurred_at     TEXT NOT NULL,
    note            TEXT
);

CREATE TABLE IF NOT EXISTS products (
    product_id   TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    description  TEXT,
    unit_price   TEXT NOT NULL DEFAULT '0',
    active       INTEGER NOT NULL DEFAULT 1,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS invoices (
    invoice_id     TEXT PRIMARY KEY,
    customer_name  TEXT NOT NULL,
    issued_on      TEXT NOT NULL,   -- calendar date, YYYY-MM-DD
    due_on         TEXT NOT NULL,
    total          TEXT NOT NULL DEFAULT '0',
    created_at     TEXT NOT NULL
);

-- Payments are append-only; corrections are new rows, not edits.
CREATE TABLE IF NOT EXISTS payments (
    payment_id   TEXT PRIMARY KEY,
    invoice_id   TEXT NOT NULL REFERENCES invoices(invoice_id),
    amount       TEXT NOT NULL,
    method       TEXT NOT NULL,   -- 'cash' | 'card' | 'transfer' | 'other'
    received_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS staff (
    staff_id    TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    role_title  TEXT NOT NULL,
    email       TEXT,
    active      INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS settings (
    key    TEXT PRIMARY KEY,
    value  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS notifications (
    notification_id  TEXT PRIMARY KEY,
    title            TEXT NOT NULL,
    body             TEXT NOT NULL,
    read             INTEGER NOT NULL DEFAULT 0,
    created_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS usage_material_idx  ON usage_events(material_id);
CREATE INDEX IF NOT EXISTS usage_occurred_idx  ON usage_events(occurred_at);
CREATE INDEX IF NOT EXISTS restock_material_idx ON restock_events(material_id);
CREATE INDEX IF NOT EXISTS payments_invoice_idx ON payments(invoice_id);

PRAGMA user_version = 1;
";
