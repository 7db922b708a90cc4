//! The `ShopStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `pressroom-store-sqlite`). The API layer depends on this abstraction,
//! not on any concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
  billing::{Invoice, InvoiceView, NewInvoice, NewPayment, Payment},
  catalog::{NewProduct, Product, ProductUpdate},
  error::StoreError,
  material::{Material, MaterialUpdate, NewMaterial},
  notification::{NewNotification, Notification},
  settings::Setting,
  staff::{NewStaffMember, StaffMember, StaffUpdate},
  usage::{NewUsageEvent, RestockEvent, UsageEvent},
};

/// Abstraction over a Pressroom storage backend.
///
/// Usage events and payments are append-only; the records they reference
/// (materials, invoices) refuse deletion while dependents exist. Derived
/// values (stock health, payment status) are computed by callers or by
/// read methods — never persisted.
pub trait ShopStore: Send + Sync {
  type Error: StoreError + Send + Sync + 'static;

  // ── Materials ─────────────────────────────────────────────────────────

  /// Create and persist a material. Negative starting numbers are floored
  /// at zero.
  fn add_material(
    &self,
    input: NewMaterial,
  ) -> impl Future<Output = Result<Material, Self::Error>> + Send + '_;

  /// Retrieve a material by id. Returns `None` if not found.
  fn get_material(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Material>, Self::Error>> + Send + '_;

  /// List all materials, ordered by name.
  fn list_materials(
    &self,
  ) -> impl Future<Output = Result<Vec<Material>, Self::Error>> + Send + '_;

  /// Apply a partial update and return the stored result.
  fn update_material(
    &self,
    id: Uuid,
    update: MaterialUpdate,
  ) -> impl Future<Output = Result<Material, Self::Error>> + Send + '_;

  /// Delete a material. Fails while any usage or restock event
  /// references it.
  fn delete_material(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Stock movement ────────────────────────────────────────────────────

  /// Record a consumption event and decrement the material's on-hand
  /// quantity, floored at zero. `occurred_at` defaults to now.
  fn record_usage(
    &self,
    input: NewUsageEvent,
  ) -> impl Future<Output = Result<UsageEvent, Self::Error>> + Send + '_;

  /// Append a restock to its ledger and increment the material's on-hand
  /// quantity, returning the updated material. Restocks do not enter the
  /// usage aggregate.
  fn record_restock(
    &self,
    material_id: Uuid,
    quantity: f64,
    note: Option<String>,
  ) -> impl Future<Output = Result<Material, Self::Error>> + Send + '_;

  /// List usage events, newest first, optionally narrowed to one material
  /// and/or a lower time bound.
  fn list_usage_events(
    &self,
    material_id: Option<Uuid>,
    since: Option<DateTime<Utc>>,
  ) -> impl Future<Output = Result<Vec<UsageEvent>, Self::Error>> + Send + '_;

  /// List restock events, newest first, optionally narrowed to one
  /// material.
  fn list_restock_events(
    &self,
    material_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<RestockEvent>, Self::Error>> + Send + '_;

  // ── Products ──────────────────────────────────────────────────────────

  fn add_product(
    &self,
    input: NewProduct,
  ) -> impl Future<Output = Result<Product, Self::Error>> + Send + '_;

  fn get_product(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + '_;

  /// List products, ordered by name. `active_only` hides retired items.
  fn list_products(
    &self,
    active_only: bool,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  fn update_product(
    &self,
    id: Uuid,
    update: ProductUpdate,
  ) -> impl Future<Output = Result<Product, Self::Error>> + Send + '_;

  fn delete_product(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Invoices and payments ─────────────────────────────────────────────

  fn add_invoice(
    &self,
    input: NewInvoice,
  ) -> impl Future<Output = Result<Invoice, Self::Error>> + Send + '_;

  /// Retrieve an invoice with its paid sum and derived payment status.
  fn get_invoice(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<InvoiceView>, Self::Error>> + Send + '_;

  /// List all invoices as views, newest issued first.
  fn list_invoices(
    &self,
  ) -> impl Future<Output = Result<Vec<InvoiceView>, Self::Error>> + Send + '_;

  /// Delete an invoice. Fails if any payment references it.
  fn delete_invoice(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Record a payment against an invoice. The amount must be positive;
  /// `received_at` defaults to now.
  fn add_payment(
    &self,
    invoice_id: Uuid,
    input: NewPayment,
  ) -> impl Future<Output = Result<Payment, Self::Error>> + Send + '_;

  /// List an invoice's payments, oldest first.
  fn list_payments(
    &self,
    invoice_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Payment>, Self::Error>> + Send + '_;

  /// Sum of recorded payments for an invoice; zero when there are none.
  fn paid_total(
    &self,
    invoice_id: Uuid,
  ) -> impl Future<Output = Result<Decimal, Self::Error>> + Send + '_;

  // ── Staff ─────────────────────────────────────────────────────────────

  fn add_staff(
    &self,
    input: NewStaffMember,
  ) -> impl Future<Output = Result<StaffMember, Self::Error>> + Send + '_;

  fn get_staff(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<StaffMember>, Self::Error>> + Send + '_;

  /// List staff, ordered by name. `active_only` hides deactivated members.
  fn list_staff(
    &self,
    active_only: bool,
  ) -> impl Future<Output = Result<Vec<StaffMember>, Self::Error>> + Send + '_;

  fn update_staff(
    &self,
    id: Uuid,
    update: StaffUpdate,
  ) -> impl Future<Output = Result<StaffMember, Self::Error>> + Send + '_;

  // ── Settings ──────────────────────────────────────────────────────────

  fn get_setting<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<Setting>, Self::Error>> + Send + 'a;

  /// Insert or overwrite a setting and return the stored pair.
  fn put_setting<'a>(
    &'a self,
    key: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<Setting, Self::Error>> + Send + 'a;

  fn list_settings(
    &self,
  ) -> impl Future<Output = Result<Vec<Setting>, Self::Error>> + Send + '_;

  // ── Notifications ─────────────────────────────────────────────────────

  fn push_notification(
    &self,
    input: NewNotification,
  ) -> impl Future<Output = Result<Notification, Self::Error>> + Send + '_;

  /// List notifications, newest first.
  fn list_notifications(
    &self,
    unread_only: bool,
  ) -> impl Future<Output = Result<Vec<Notification>, Self::Error>> + Send + '_;

  /// Mark a notification read and return it. Idempotent.
  fn mark_notification_read(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Notification, Self::Error>> + Send + '_;
}
