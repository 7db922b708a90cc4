//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as
//! `YYYY-MM-DD`, money as canonical decimal strings, and UUIDs as
//! hyphenated lowercase strings. Row decoding goes through raw-row structs
//! so every column read has one fallible conversion point.

use std::str::FromStr as _;

use chrono::{DateTime, NaiveDate, Utc};
use pressroom_core::{
  billing::{Invoice, Payment, PaymentMethod},
  catalog::Product,
  material::Material,
  notification::Notification,
  staff::StaffMember,
  usage::{RestockEvent, UsageEvent},
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Decimal ─────────────────────────────────────────────────────────────────

pub fn encode_decimal(d: Decimal) -> String { d.to_string() }

pub fn decode_decimal(s: &str) -> Result<Decimal> {
  Decimal::from_str(s).map_err(|e| Error::DecimalParse(e.to_string()))
}

// ─── PaymentMethod ───────────────────────────────────────────────────────────

pub fn encode_payment_method(m: PaymentMethod) -> &'static str {
  match m {
    PaymentMethod::Cash => "cash",
    PaymentMethod::Card => "card",
    PaymentMethod::Transfer => "transfer",
    PaymentMethod::Other => "other",
  }
}

pub fn decode_payment_method(s: &str) -> Result<PaymentMethod> {
  match s {
    "cash" => Ok(PaymentMethod::Cash),
    "card" => Ok(PaymentMethod::Card),
    "transfer" => Ok(PaymentMethod::Transfer),
    "other" => Ok(PaymentMethod::Other),
    other => Err(Error::UnknownPaymentMethod(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `materials` row.
pub struct RawMaterial {
  pub material_id:       String,
  pub name:              String,
  pub category:          Option<String>,
  pub unit:              String,
  pub current_quantity:  f64,
  pub reorder_threshold: f64,
  pub unit_cost:         String,
  pub supplier:          Option<String>,
  pub created_at:        String,
  pub updated_at:        String,
}

impl RawMaterial {
  pub fn into_material(self) -> Result<Material> {
    Ok(Material {
      material_id:       decode_uuid(&self.material_id)?,
      name:              self.name,
      category:          self.category,
      unit:              self.unit,
      // Normalisation boundary: quantities never leave here negative.
      current_quantity:  self.current_quantity.max(0.0),
      reorder_threshold: self.reorder_threshold.max(0.0),
      unit_cost:         decode_decimal(&self.unit_cost)?,
      supplier:          self.supplier,
      created_at:        decode_dt(&self.created_at)?,
      updated_at:        decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `usage_events` row.
pub struct RawUsageEvent {
  pub event_id:          String,
  pub material_id:       String,
  pub quantity_consumed: f64,
  pub occurred_at:       String,
  pub note:              Option<String>,
}

impl RawUsageEvent {
  pub fn into_event(self) -> Result<UsageEvent> {
    Ok(UsageEvent {
      event_id:          decode_uuid(&self.event_id)?,
      material_id:       decode_uuid(&self.material_id)?,
      quantity_consumed: self.quantity_consumed,
      occurred_at:       decode_dt(&self.occurred_at)?,
      note:              self.note,
    })
  }
}

/// Raw strings read directly from a `restock_events` row.
pub struct RawRestock {
  pub restock_id:     String,
  pub material_id:    String,
  pub quantity_added: f64,
  pub occurred_at:    String,
  pub note:           Option<String>,
}

impl RawRestock {
  pub fn into_restock(self) -> Result<RestockEvent> {
    Ok(RestockEvent {
      restock_id:     decode_uuid(&self.restock_id)?,
      material_id:    decode_uuid(&self.material_id)?,
      quantity_added: self.quantity_added,
      occurred_at:    decode_dt(&self.occurred_at)?,
      note:           self.note,
    })
  }
}

/// Raw strings read directly from a `products` row.
pub struct RawProduct {
  pub product_id:  String,
  pub name:        String,
  pub description: Option<String>,
  pub unit_price:  String,
  pub active:      bool,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawProduct {
  pub fn into_product(self) -> Result<Product> {
    Ok(Product {
      product_id:  decode_uuid(&self.product_id)?,
      name:        self.name,
      description: self.description,
      unit_price:  decode_decimal(&self.unit_price)?,
      active:      self.active,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from an `invoices` row.
pub struct RawInvoice {
  pub invoice_id:    String,
  pub customer_name: String,
  pub issued_on:     String,
  pub due_on:        String,
  pub total:         String,
  pub created_at:    String,
}

impl RawInvoice {
  pub fn into_invoice(self) -> Result<Invoice> {
    Ok(Invoice {
      invoice_id:    decode_uuid(&self.invoice_id)?,
      customer_name: self.customer_name,
      issued_on:     decode_date(&self.issued_on)?,
      due_on:        decode_date(&self.due_on)?,
      total:         decode_decimal(&self.total)?,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `payments` row.
pub struct RawPayment {
  pub payment_id:  String,
  pub invoice_id:  String,
  pub amount:      String,
  pub method:      String,
  pub received_at: String,
}

impl RawPayment {
  pub fn into_payment(self) -> Result<Payment> {
    Ok(Payment {
      payment_id:  decode_uuid(&self.payment_id)?,
      invoice_id:  decode_uuid(&self.invoice_id)?,
      amount:      decode_decimal(&self.amount)?,
      method:      decode_payment_method(&self.method)?,
      received_at: decode_dt(&self.received_at)?,
    })
  }
}

/// Raw strings read directly from a `staff` row.
pub struct RawStaff {
  pub staff_id:   String,
  pub name:       String,
  pub role_title: String,
  pub email:      Option<String>,
  pub active:     bool,
  pub created_at: String,
}

impl RawStaff {
  pub fn into_staff(self) -> Result<StaffMember> {
    Ok(StaffMember {
      staff_id:   decode_uuid(&self.staff_id)?,
      name:       self.name,
      role_title: self.role_title,
      email:      self.email,
      active:     self.active,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `notifications` row.
pub struct RawNotification {
  pub notification_id: String,
  pub title:           String,
  pub body:            String,
  pub read:            bool,
  pub created_at:      String,
}

impl RawNotification {
  pub fn into_notification(self) -> Result<Notification> {
    Ok(Notification {
      notification_id: decode_uuid(&self.notification_id)?,
      title:           self.title,
      body:            self.body,
      read:            self.read,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}
