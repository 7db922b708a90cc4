//! [`SqliteStore`] — the SQLite implementation of [`ShopStore`].

use std::{collections::HashMap, path::Path};

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use rust_decimal::Decimal;
use uuid::Uuid;

use pressroom_core::{
  Error as CoreError,
  billing::{Invoice, InvoiceView, NewInvoice, NewPayment, Payment},
  catalog::{NewProduct, Product, ProductUpdate},
  material::{Material, MaterialUpdate, NewMaterial},
  notification::{NewNotification, Notification},
  settings::Setting,
  staff::{NewStaffMember, StaffMember, StaffUpdate},
  store::ShopStore,
  usage::{NewUsageEvent, RestockEvent, UsageEvent},
};

use crate::{
  Error, Result,
  encode::{
    RawInvoice, RawMaterial, RawNotification, RawPayment, RawProduct,
    RawRestock, RawStaff, RawUsageEvent, decode_decimal, encode_date,
    encode_decimal, encode_dt, encode_payment_method, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Row mappers ─────────────────────────────────────────────────────────────

fn material_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawMaterial> {
  Ok(RawMaterial {
    material_id:       row.get(0)?,
    name:              row.get(1)?,
    category:          row.get(2)?,
    unit:              row.get(3)?,
    current_quantity:  row.get(4)?,
    reorder_threshold: row.get(5)?,
    unit_cost:         row.get(6)?,
    supplier:          row.get(7)?,
    created_at:        row.get(8)?,
    updated_at:        row.get(9)?,
  })
}

const MATERIAL_COLS: &str = "material_id, name, category, unit, \
   current_quantity, reorder_threshold, unit_cost, supplier, created_at, \
   updated_at";

fn event_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUsageEvent> {
  Ok(RawUsageEvent {
    event_id:          row.get(0)?,
    material_id:       row.get(1)?,
    quantity_consumed: row.get(2)?,
    occurred_at:       row.get(3)?,
    note:              row.get(4)?,
  })
}

fn restock_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRestock> {
  Ok(RawRestock {
    restock_id:     row.get(0)?,
    material_id:    row.get(1)?,
    quantity_added: row.get(2)?,
    occurred_at:    row.get(3)?,
    note:           row.get(4)?,
  })
}

fn product_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawProduct> {
  Ok(RawProduct {
    product_id:  row.get(0)?,
    name:        row.get(1)?,
    description: row.get(2)?,
    unit_price:  row.get(3)?,
    active:      row.get(4)?,
    created_at:  row.get(5)?,
    updated_at:  row.get(6)?,
  })
}

fn invoice_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawInvoice> {
  Ok(RawInvoice {
    invoice_id:    row.get(0)?,
    customer_name: row.get(1)?,
    issued_on:     row.get(2)?,
    due_on:        row.get(3)?,
    total:         row.get(4)?,
    created_at:    row.get(5)?,
  })
}

fn payment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPayment> {
  Ok(RawPayment {
    payment_id:  row.get(0)?,
    invoice_id:  row.get(1)?,
    amount:      row.get(2)?,
    method:      row.get(3)?,
    received_at: row.get(4)?,
  })
}

fn staff_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawStaff> {
  Ok(RawStaff {
    staff_id:   row.get(0)?,
    name:       row.get(1)?,
    role_title: row.get(2)?,
    email:      row.get(3)?,
    active:     row.get(4)?,
    created_at: row.get(5)?,
  })
}

fn notification_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawNotification> {
  Ok(RawNotification {
    notification_id: row.get(0)?,
    title:           row.get(1)?,
    body:            row.get(2)?,
    read:            row.get(3)?,
    created_at:      row.get(4)?,
  })
}

/// Outcome of a guarded delete. The existence check, the dependent check
/// and the DELETE all run inside one transaction; the closure reports
/// which way it went and the caller maps that onto a domain error.
enum GuardedDelete {
  Deleted,
  Missing,
  HasDependents,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Pressroom shop store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
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

  /// True if the material row exists.
  async fn material_exists(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let exists: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM materials WHERE material_id = ?1",
              rusqlite::params![id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  /// True if the invoice row exists.
  async fn invoice_exists(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let exists: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM invoices WHERE invoice_id = ?1",
              rusqlite::params![id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  /// Fetch the bare invoice row without its derived numbers.
  async fn get_invoice_row(&self, id: Uuid) -> Result<Option<Invoice>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawInvoice> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT invoice_id, customer_name, issued_on, due_on, total, \
               created_at FROM invoices WHERE invoice_id = ?1",
              rusqlite::params![id_str],
              invoice_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawInvoice::into_invoice).transpose()
  }
}

// ─── ShopStore impl ──────────────────────────────────────────────────────────

impl ShopStore for SqliteStore {
  type Error = Error;

  // ── Materials ─────────────────────────────────────────────────────────────

  async fn add_material(&self, input: NewMaterial) -> Result<Material> {
    let now = Utc::now();
    let material = Material {
      material_id:       Uuid::new_v4(),
      name:              input.name,
      category:          input.category,
      unit:              input.unit,
      current_quantity:  input.current_quantity.max(0.0),
      reorder_threshold: input.reorder_threshold.max(0.0),
      unit_cost:         input.unit_cost,
      supplier:          input.supplier,
      created_at:        now,
      updated_at:        now,
    };

    let id_str       = encode_uuid(material.material_id);
    let name         = material.name.clone();
    let category     = material.category.clone();
    let unit         = material.unit.clone();
    let quantity     = material.current_quantity;
    let threshold    = material.reorder_threshold;
    let unit_cost    = encode_decimal(material.unit_cost);
    let supplier     = material.supplier.clone();
    let created_str  = encode_dt(material.created_at);
    let updated_str  = encode_dt(material.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO materials (
             material_id, name, category, unit, current_quantity,
             reorder_threshold, unit_cost, supplier, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            name,
            category,
            unit,
            quantity,
            threshold,
            unit_cost,
            supplier,
            created_str,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(material)
  }

  async fn get_material(&self, id: Uuid) -> Result<Option<Material>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawMaterial> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {MATERIAL_COLS} FROM materials WHERE material_id = ?1"
              ),
              rusqlite::params![id_str],
              material_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMaterial::into_material).transpose()
  }

  async fn list_materials(&self) -> Result<Vec<Material>> {
    let raws: Vec<RawMaterial> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MATERIAL_COLS} FROM materials ORDER BY name"
        ))?;
        let rows = stmt
          .query_map([], material_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMaterial::into_material).collect()
  }

  async fn update_material(
    &self,
    id: Uuid,
    update: MaterialUpdate,
  ) -> Result<Material> {
    let mut material = self
      .get_material(id)
      .await?
      .ok_or(Error::Core(CoreError::MaterialNotFound(id)))?;

    if let Some(name) = update.name {
      material.name = name;
    }
    if let Some(category) = update.category {
      material.category = category;
    }
    if let Some(unit) = update.unit {
      material.unit = unit;
    }
    if let Some(threshold) = update.reorder_threshold {
      material.reorder_threshold = threshold.max(0.0);
    }
    if let Some(unit_cost) = update.unit_cost {
      material.unit_cost = unit_cost;
    }
    if let Some(supplier) = update.supplier {
      material.supplier = supplier;
    }
    material.updated_at = Utc::now();

    let id_str      = encode_uuid(id);
    let name        = material.name.clone();
    let category    = material.category.clone();
    let unit        = material.unit.clone();
    let threshold   = material.reorder_threshold;
    let unit_cost   = encode_decimal(material.unit_cost);
    let supplier    = material.supplier.clone();
    let updated_str = encode_dt(material.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE materials
           SET name = ?2, category = ?3, unit = ?4, reorder_threshold = ?5,
               unit_cost = ?6, supplier = ?7, updated_at = ?8
           WHERE material_id = ?1",
          rusqlite::params![
            id_str,
            name,
            category,
            unit,
            threshold,
            unit_cost,
            supplier,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(material)
  }

  async fn delete_material(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let exists: bool = tx.query_row(
          "SELECT EXISTS(SELECT 1 FROM materials WHERE material_id = ?1)",
          rusqlite::params![id_str],
          |row| row.get(0),
        )?;
        if !exists {
          return Ok(GuardedDelete::Missing);
        }
        let dependents: i64 = tx.query_row(
          "SELECT (SELECT COUNT(*) FROM usage_events WHERE material_id = ?1)
                + (SELECT COUNT(*) FROM restock_events WHERE material_id = ?1)",
          rusqlite::params![id_str],
          |row| row.get(0),
        )?;
        if dependents > 0 {
          return Ok(GuardedDelete::HasDependents);
        }
        tx.execute(
          "DELETE FROM materials WHERE material_id = ?1",
          rusqlite::params![id_str],
        )?;
        tx.commit()?;
        Ok(GuardedDelete::Deleted)
      })
      .await?;

    match outcome {
      GuardedDelete::Deleted => Ok(()),
      GuardedDelete::Missing => {
        Err(Error::Core(CoreError::MaterialNotFound(id)))
      }
      GuardedDelete::HasDependents => {
        Err(Error::Core(CoreError::MaterialInUse(id)))
      }
    }
  }

  // ── Stock movement ────────────────────────────────────────────────────────

  async fn record_usage(&self, input: NewUsageEvent) -> Result<UsageEvent> {
    if !input.quantity_consumed.is_finite() || input.quantity_consumed <= 0.0 {
      return Err(Error::Core(CoreError::NonPositiveQuantity(
        input.quantity_consumed,
      )));
    }
    if !self.material_exists(input.material_id).await? {
      return Err(Error::Core(CoreError::MaterialNotFound(input.material_id)));
    }

    let event = UsageEvent {
      event_id:          Uuid::new_v4(),
      material_id:       input.material_id,
      quantity_consumed: input.quantity_consumed,
      occurred_at:       input.occurred_at.unwrap_or_else(Utc::now),
      note:              input.note,
    };

    let event_id_str    = encode_uuid(event.event_id);
    let material_id_str = encode_uuid(event.material_id);
    let quantity        = event.quantity_consumed;
    let occurred_str    = encode_dt(event.occurred_at);
    let note            = event.note.clone();
    let updated_str     = encode_dt(Utc::now());

    // Insert + decrement must land together.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO usage_events (
             event_id, material_id, quantity_consumed, occurred_at, note
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            event_id_str,
            material_id_str,
            quantity,
            occurred_str,
            note,
          ],
        )?;
        tx.execute(
          "UPDATE materials
           SET current_quantity = MAX(0, current_quantity - ?2),
               updated_at = ?3
           WHERE material_id = ?1",
          rusqlite::params![material_id_str, quantity, updated_str],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(event)
  }

  async fn record_restock(
    &self,
    material_id: Uuid,
    quantity: f64,
    note: Option<String>,
  ) -> Result<Material> {
    if !quantity.is_finite() || quantity <= 0.0 {
      return Err(Error::Core(CoreError::NonPositiveQuantity(quantity)));
    }
    if !self.material_exists(material_id).await? {
      return Err(Error::Core(CoreError::MaterialNotFound(material_id)));
    }

    let restock_id_str = encode_uuid(Uuid::new_v4());
    let id_str         = encode_uuid(material_id);
    let now_str        = encode_dt(Utc::now());

    // Ledger row + increment must land together.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO restock_events (
             restock_id, material_id, quantity_added, occurred_at, note
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![restock_id_str, id_str, quantity, now_str, note],
        )?;
        tx.execute(
          "UPDATE materials
           SET current_quantity = current_quantity + ?2, updated_at = ?3
           WHERE material_id = ?1",
          rusqlite::params![id_str, quantity, now_str],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    self
      .get_material(material_id)
      .await?
      .ok_or(Error::Core(CoreError::MaterialNotFound(material_id)))
  }

  async fn list_usage_events(
    &self,
    material_id: Option<Uuid>,
    since: Option<DateTime<Utc>>,
  ) -> Result<Vec<UsageEvent>> {
    let material_str = material_id.map(encode_uuid);
    let since_str    = since.map(encode_dt);

    let raws: Vec<RawUsageEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT event_id, material_id, quantity_consumed, occurred_at, note
           FROM usage_events
           WHERE (?1 IS NULL OR material_id = ?1)
             AND (?2 IS NULL OR occurred_at >= ?2)
           ORDER BY occurred_at DESC",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![material_str.as_deref(), since_str.as_deref()],
            event_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUsageEvent::into_event).collect()
  }

  async fn list_restock_events(
    &self,
    material_id: Option<Uuid>,
  ) -> Result<Vec<RestockEvent>> {
    let material_str = material_id.map(encode_uuid);

    let raws: Vec<RawRestock> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT restock_id, material_id, quantity_added, occurred_at, note
           FROM restock_events
           WHERE (?1 IS NULL OR material_id = ?1)
           ORDER BY occurred_at DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![material_str.as_deref()], restock_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRestock::into_restock).collect()
  }

  // ── Products ──────────────────────────────────────────────────────────────

  async fn add_product(&self, input: NewProduct) -> Result<Product> {
    let now = Utc::now();
    let product = Product {
      product_id:  Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      unit_price:  input.unit_price,
      active:      input.active,
      created_at:  now,
      updated_at:  now,
    };

    let id_str      = encode_uuid(product.product_id);
    let name        = product.name.clone();
    let description = product.description.clone();
    let price       = encode_decimal(product.unit_price);
    let active      = product.active;
    let created_str = encode_dt(product.created_at);
    let updated_str = encode_dt(product.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO products (
             product_id, name, description, unit_price, active,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            name,
            description,
            price,
            active,
            created_str,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(product)
  }

  async fn get_product(&self, id: Uuid) -> Result<Option<Product>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawProduct> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT product_id, name, description, unit_price, active, \
               created_at, updated_at FROM products WHERE product_id = ?1",
              rusqlite::params![id_str],
              product_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProduct::into_product).transpose()
  }

  async fn list_products(&self, active_only: bool) -> Result<Vec<Product>> {
    let raws: Vec<RawProduct> = self
      .conn
      .call(move |conn| {
        let sql = if active_only {
          "SELECT product_id, name, description, unit_price, active, \
           created_at, updated_at FROM products WHERE active = 1 \
           ORDER BY name"
        } else {
          "SELECT product_id, name, description, unit_price, active, \
           created_at, updated_at FROM products ORDER BY name"
        };
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map([], product_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProduct::into_product).collect()
  }

  async fn update_product(
    &self,
    id: Uuid,
    update: ProductUpdate,
  ) -> Result<Product> {
    let mut product = self
      .get_product(id)
      .await?
      .ok_or(Error::Core(CoreError::ProductNotFound(id)))?;

    if let Some(name) = update.name {
      product.name = name;
    }
    if let Some(description) = update.description {
      product.description = description;
    }
    if let Some(price) = update.unit_price {
      product.unit_price = price;
    }
    if let Some(active) = update.active {
      product.active = active;
    }
    product.updated_at = Utc::now();

    let id_str      = encode_uuid(id);
    let name        = product.name.clone();
    let description = product.description.clone();
    let price       = encode_decimal(product.unit_price);
    let active      = product.active;
    let updated_str = encode_dt(product.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE products
           SET name = ?2, description = ?3, unit_price = ?4, active = ?5,
               updated_at = ?6
           WHERE product_id = ?1",
          rusqlite::params![id_str, name, description, price, active, updated_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(product)
  }

  async fn delete_product(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let affected: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM products WHERE product_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::Core(CoreError::ProductNotFound(id)));
    }
    Ok(())
  }

  // ── Invoices and payments ─────────────────────────────────────────────────

  async fn add_invoice(&self, input: NewInvoice) -> Result<Invoice> {
    let invoice = Invoice {
      invoice_id:    Uuid::new_v4(),
      customer_name: input.customer_name,
      issued_on:     input.issued_on,
      due_on:        input.due_on,
      total:         input.total,
      created_at:    Utc::now(),
    };

    let id_str      = encode_uuid(invoice.invoice_id);
    let customer    = invoice.customer_name.clone();
    let issued_str  = encode_date(invoice.issued_on);
    let due_str     = encode_date(invoice.due_on);
    let total_str   = encode_decimal(invoice.total);
    let created_str = encode_dt(invoice.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO invoices (
             invoice_id, customer_name, issued_on, due_on, total, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str,
            customer,
            issued_str,
            due_str,
            total_str,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(invoice)
  }

  async fn get_invoice(&self, id: Uuid) -> Result<Option<InvoiceView>> {
    let invoice = match self.get_invoice_row(id).await? {
      Some(invoice) => invoice,
      None => return Ok(None),
    };

    let paid = self.paid_total(id).await?;
    Ok(Some(InvoiceView::new(invoice, paid)))
  }

  async fn list_invoices(&self) -> Result<Vec<InvoiceView>> {
    let raws: Vec<RawInvoice> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT invoice_id, customer_name, issued_on, due_on, total, \
           created_at FROM invoices ORDER BY issued_on DESC, created_at DESC",
        )?;
        let rows = stmt
          .query_map([], invoice_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    // Money lives in TEXT columns, so the paid sums fold in Rust where
    // Decimal arithmetic is exact.
    let amounts: Vec<(String, String)> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT invoice_id, amount FROM payments")?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut paid_by_invoice: HashMap<String, Decimal> = HashMap::new();
    for (invoice_id, amount) in amounts {
      let amount = decode_decimal(&amount)?;
      *paid_by_invoice.entry(invoice_id).or_insert(Decimal::ZERO) += amount;
    }

    raws
      .into_iter()
      .map(|raw| {
        let paid = paid_by_invoice
          .get(&raw.invoice_id)
          .copied()
          .unwrap_or(Decimal::ZERO);
        Ok(InvoiceView::new(raw.into_invoice()?, paid))
      })
      .collect()
  }

  async fn delete_invoice(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let exists: bool = tx.query_row(
          "SELECT EXISTS(SELECT 1 FROM invoices WHERE invoice_id = ?1)",
          rusqlite::params![id_str],
          |row| row.get(0),
        )?;
        if !exists {
          return Ok(GuardedDelete::Missing);
        }
        let payments: i64 = tx.query_row(
          "SELECT COUNT(*) FROM payments WHERE invoice_id = ?1",
          rusqlite::params![id_str],
          |row| row.get(0),
        )?;
        if payments > 0 {
          return Ok(GuardedDelete::HasDependents);
        }
        tx.execute(
          "DELETE FROM invoices WHERE invoice_id = ?1",
          rusqlite::params![id_str],
        )?;
        tx.commit()?;
        Ok(GuardedDelete::Deleted)
      })
      .await?;

    match outcome {
      GuardedDelete::Deleted => Ok(()),
      GuardedDelete::Missing => {
        Err(Error::Core(CoreError::InvoiceNotFound(id)))
      }
      GuardedDelete::HasDependents => {
        Err(Error::Core(CoreError::InvoiceHasPayments(id)))
      }
    }
  }

  async fn add_payment(
    &self,
    invoice_id: Uuid,
    input: NewPayment,
  ) -> Result<Payment> {
    if input.amount <= Decimal::ZERO {
      return Err(Error::Core(CoreError::NonPositiveAmount(input.amount)));
    }
    if !self.invoice_exists(invoice_id).await? {
      return Err(Error::Core(CoreError::InvoiceNotFound(invoice_id)));
    }

    let payment = Payment {
      payment_id:  Uuid::new_v4(),
      invoice_id,
      amount:      input.amount,
      method:      input.method,
      received_at: input.received_at.unwrap_or_else(Utc::now),
    };

    let id_str       = encode_uuid(payment.payment_id);
    let invoice_str  = encode_uuid(invoice_id);
    let amount_str   = encode_decimal(payment.amount);
    let method_str   = encode_payment_method(payment.method).to_owned();
    let received_str = encode_dt(payment.received_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO payments (
             payment_id, invoice_id, amount, method, received_at
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            id_str,
            invoice_str,
            amount_str,
            method_str,
            received_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(payment)
  }

  async fn list_payments(&self, invoice_id: Uuid) -> Result<Vec<Payment>> {
    let invoice_str = encode_uuid(invoice_id);

    let raws: Vec<RawPayment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT payment_id, invoice_id, amount, method, received_at
           FROM payments WHERE invoice_id = ?1 ORDER BY received_at",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![invoice_str], payment_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPayment::into_payment).collect()
  }

  async fn paid_total(&self, invoice_id: Uuid) -> Result<Decimal> {
    let payments = self.list_payments(invoice_id).await?;
    Ok(payments.iter().map(|p| p.amount).sum())
  }

  // ── Staff ─────────────────────────────────────────────────────────────────

  async fn add_staff(&self, input: NewStaffMember) -> Result<StaffMember> {
    let member = StaffMember {
      staff_id:   Uuid::new_v4(),
      name:       input.name,
      role_title: input.role_title,
      email:      input.email,
      active:     true,
      created_at: Utc::now(),
    };

    let id_str      = encode_uuid(member.staff_id);
    let name        = member.name.clone();
    let role_title  = member.role_title.clone();
    let email       = member.email.clone();
    let created_str = encode_dt(member.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO staff (staff_id, name, role_title, email, active, \
           created_at) VALUES (?1, ?2, ?3, ?4, 1, ?5)",
          rusqlite::params![id_str, name, role_title, email, created_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(member)
  }

  async fn get_staff(&self, id: Uuid) -> Result<Option<StaffMember>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawStaff> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT staff_id, name, role_title, email, active, created_at \
               FROM staff WHERE staff_id = ?1",
              rusqlite::params![id_str],
              staff_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStaff::into_staff).transpose()
  }

  async fn list_staff(&self, active_only: bool) -> Result<Vec<StaffMember>> {
    let raws: Vec<RawStaff> = self
      .conn
      .call(move |conn| {
        let sql = if active_only {
          "SELECT staff_id, name, role_title, email, active, created_at \
           FROM staff WHERE active = 1 ORDER BY name"
        } else {
          "SELECT staff_id, name, role_title, email, active, created_at \
           FROM staff ORDER BY name"
        };
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map([], staff_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStaff::into_staff).collect()
  }

  async fn update_staff(
    &self,
    id: Uuid,
    update: StaffUpdate,
  ) -> Result<StaffMember> {
    let mut member = self
      .get_staff(id)
      .await?
      .ok_or(Error::Core(CoreError::StaffNotFound(id)))?;

    if let Some(name) = update.name {
      member.name = name;
    }
    if let Some(role_title) = update.role_title {
      member.role_title = role_title;
    }
    if let Some(email) = update.email {
      member.email = email;
    }
    if let Some(active) = update.active {
      member.active = active;
    }

    let id_str     = encode_uuid(id);
    let name       = member.name.clone();
    let role_title = member.role_title.clone();
    let email      = member.email.clone();
    let active     = member.active;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE staff
           SET name = ?2, role_title = ?3, email = ?4, active = ?5
           WHERE staff_id = ?1",
          rusqlite::params![id_str, name, role_title, email, active],
        )?;
        Ok(())
      })
      .await?;

    Ok(member)
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  async fn get_setting(&self, key: &str) -> Result<Option<Setting>> {
    let key_owned = key.to_owned();

    let value: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM settings WHERE key = ?1",
              rusqlite::params![key_owned],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(value.map(|value| Setting { key: key.to_owned(), value }))
  }

  async fn put_setting(&self, key: &str, value: &str) -> Result<Setting> {
    let key_owned   = key.to_owned();
    let value_owned = value.to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO settings (key, value) VALUES (?1, ?2)
           ON CONFLICT(key) DO UPDATE SET value = excluded.value",
          rusqlite::params![key_owned, value_owned],
        )?;
        Ok(())
      })
      .await?;

    Ok(Setting { key: key.to_owned(), value: value.to_owned() })
  }

  async fn list_settings(&self) -> Result<Vec<Setting>> {
    let pairs: Vec<(String, String)> = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      pairs
        .into_iter()
        .map(|(key, value)| Setting { key, value })
        .collect(),
    )
  }

  // ── Notifications ─────────────────────────────────────────────────────────

  async fn push_notification(
    &self,
    input: NewNotification,
  ) -> Result<Notification> {
    let notification = Notification {
      notification_id: Uuid::new_v4(),
      title:           input.title,
      body:            input.body,
      read:            false,
      created_at:      Utc::now(),
    };

    let id_str      = encode_uuid(notification.notification_id);
    let title       = notification.title.clone();
    let body        = notification.body.clone();
    let created_str = encode_dt(notification.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO notifications (notification_id, title, body, read, \
           created_at) VALUES (?1, ?2, ?3, 0, ?4)",
          rusqlite::params![id_str, title, body, created_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(notification)
  }

  async fn list_notifications(
    &self,
    unread_only: bool,
  ) -> Result<Vec<Notification>> {
    let raws: Vec<RawNotification> = self
      .conn
      .call(move |conn| {
        let sql = if unread_only {
          "SELECT notification_id, title, body, read, created_at \
           FROM notifications WHERE read = 0 ORDER BY created_at DESC"
        } else {
          "SELECT notification_id, title, body, read, created_at \
           FROM notifications ORDER BY created_at DESC"
        };
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map([], notification_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawNotification::into_notification)
      .collect()
  }

  async fn mark_notification_read(&self, id: Uuid) -> Result<Notification> {
    let id_str = encode_uuid(id);
    let affected: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE notifications SET read = 1 WHERE notification_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::Core(CoreError::NotificationNotFound(id)));
    }

    let id_str = encode_uuid(id);
    let raw: Option<RawNotification> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT notification_id, title, body, read, created_at \
               FROM notifications WHERE notification_id = ?1",
              rusqlite::params![id_str],
              notification_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .ok_or(Error::Core(CoreError::NotificationNotFound(id)))?
      .into_notification()
  }
}
