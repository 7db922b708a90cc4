//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, Utc};
use pressroom_core::{
  Error as CoreError,
  billing::{NewInvoice, NewPayment, PaymentMethod, PaymentStatus},
  catalog::{NewProduct, ProductUpdate},
  health::{StockStatus, stock_overview},
  material::{MaterialUpdate, NewMaterial},
  notification::NewNotification,
  settings,
  staff::{NewStaffMember, StaffUpdate},
  store::ShopStore,
  usage::NewUsageEvent,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn paper(quantity: f64, threshold: f64) -> NewMaterial {
  NewMaterial {
    name:              "80gsm A4".into(),
    category:          Some("paper".into()),
    unit:              "sheets".into(),
    current_quantity:  quantity,
    reorder_threshold: threshold,
    unit_cost:         dec!(0.02),
    supplier:          Some("Millbrook Paper Co".into()),
  }
}

fn consume(material_id: Uuid, qty: f64) -> NewUsageEvent {
  NewUsageEvent {
    material_id,
    quantity_consumed: qty,
    occurred_at:       None,
    note:              None,
  }
}

fn invoice(total: Decimal) -> NewInvoice {
  NewInvoice {
    customer_name: "Harbor Cafe".into(),
    issued_on:     Utc::now().date_naive(),
    due_on:        Utc::now().date_naive() + Duration::days(14),
    total,
  }
}

fn cash(amount: Decimal) -> NewPayment {
  NewPayment {
    amount,
    method: PaymentMethod::Cash,
    received_at: None,
  }
}

// ─── Materials ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_material() {
  let s = store().await;

  let material = s.add_material(paper(500.0, 100.0)).await.unwrap();
  assert_eq!(material.current_quantity, 500.0);

  let fetched = s.get_material(material.material_id).await.unwrap();
  assert!(fetched.is_some());
  let fetched = fetched.unwrap();
  assert_eq!(fetched.material_id, material.material_id);
  assert_eq!(fetched.name, "80gsm A4");
  assert_eq!(fetched.unit_cost, dec!(0.02));
}

#[tokio::test]
async fn get_material_missing_returns_none() {
  let s = store().await;
  let result = s.get_material(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn add_material_floors_negative_numbers() {
  let s = store().await;
  let material = s.add_material(paper(-20.0, -5.0)).await.unwrap();
  assert_eq!(material.current_quantity, 0.0);
  assert_eq!(material.reorder_threshold, 0.0);
}

#[tokio::test]
async fn list_materials_ordered_by_name() {
  let s = store().await;
  let mut vinyl = paper(10.0, 2.0);
  vinyl.name = "vinyl roll".into();
  s.add_material(vinyl).await.unwrap();
  s.add_material(paper(500.0, 100.0)).await.unwrap();

  let all = s.list_materials().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].name, "80gsm A4");
  assert_eq!(all[1].name, "vinyl roll");
}

#[tokio::test]
async fn update_material_partial_fields() {
  let s = store().await;
  let material = s.add_material(paper(500.0, 100.0)).await.unwrap();

  let updated = s
    .update_material(material.material_id, MaterialUpdate {
      reorder_threshold: Some(150.0),
      supplier: Some(None),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.reorder_threshold, 150.0);
  assert!(updated.supplier.is_none());
  // Untouched fields survive.
  assert_eq!(updated.name, "80gsm A4");
  assert_eq!(updated.current_quantity, 500.0);
}

#[tokio::test]
async fn update_material_missing_fails() {
  let s = store().await;
  let err = s
    .update_material(Uuid::new_v4(), MaterialUpdate::default())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::MaterialNotFound(_))));
}

#[tokio::test]
async fn delete_material_without_usage() {
  let s = store().await;
  let material = s.add_material(paper(500.0, 100.0)).await.unwrap();

  s.delete_material(material.material_id).await.unwrap();
  assert!(s.get_material(material.material_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_material_with_usage_is_refused() {
  let s = store().await;
  let material = s.add_material(paper(500.0, 100.0)).await.unwrap();
  s.record_usage(consume(material.material_id, 10.0))
    .await
    .unwrap();

  let err = s.delete_material(material.material_id).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::MaterialInUse(_))));
  assert!(s.get_material(material.material_id).await.unwrap().is_some());
}

// ─── Stock movement ──────────────────────────────────────────────────────────

#[tokio::test]
async fn record_usage_decrements_on_hand() {
  let s = store().await;
  let material = s.add_material(paper(500.0, 100.0)).await.unwrap();

  let event = s
    .record_usage(consume(material.material_id, 120.0))
    .await
    .unwrap();
  assert_eq!(event.quantity_consumed, 120.0);

  let after = s
    .get_material(material.material_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(after.current_quantity, 380.0);
}

#[tokio::test]
async fn record_usage_floors_on_hand_at_zero() {
  let s = store().await;
  let material = s.add_material(paper(50.0, 100.0)).await.unwrap();

  s.record_usage(consume(material.material_id, 80.0))
    .await
    .unwrap();

  let after = s
    .get_material(material.material_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(after.current_quantity, 0.0);
}

#[tokio::test]
async fn record_usage_rejects_non_positive_quantity() {
  let s = store().await;
  let material = s.add_material(paper(500.0, 100.0)).await.unwrap();

  let err = s
    .record_usage(consume(material.material_id, 0.0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::NonPositiveQuantity(_))));
}

#[tokio::test]
async fn record_usage_unknown_material_fails() {
  let s = store().await;
  let err = s.record_usage(consume(Uuid::new_v4(), 5.0)).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::MaterialNotFound(_))));
}

#[tokio::test]
async fn record_restock_increments_on_hand() {
  let s = store().await;
  let material = s.add_material(paper(50.0, 100.0)).await.unwrap();

  let after = s
    .record_restock(material.material_id, 450.0, None)
    .await
    .unwrap();
  assert_eq!(after.current_quantity, 500.0);
}

#[tokio::test]
async fn record_restock_rejects_non_positive_quantity() {
  let s = store().await;
  let material = s.add_material(paper(50.0, 100.0)).await.unwrap();

  let err = s
    .record_restock(material.material_id, -10.0, None)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::NonPositiveQuantity(_))));
}

#[tokio::test]
async fn restocks_are_ledgered_separately_from_usage() {
  let s = store().await;
  let a = s.add_material(paper(50.0, 100.0)).await.unwrap();
  let mut other = paper(50.0, 100.0);
  other.name = "120gsm A3".into();
  let b = s.add_material(other).await.unwrap();

  s.record_usage(consume(a.material_id, 10.0)).await.unwrap();
  s.record_restock(a.material_id, 450.0, Some("PO-2231".into()))
    .await
    .unwrap();
  s.record_restock(b.material_id, 200.0, None).await.unwrap();

  let all = s.list_restock_events(None).await.unwrap();
  assert_eq!(all.len(), 2);

  let for_a = s.list_restock_events(Some(a.material_id)).await.unwrap();
  assert_eq!(for_a.len(), 1);
  assert_eq!(for_a[0].quantity_added, 450.0);
  assert_eq!(for_a[0].note.as_deref(), Some("PO-2231"));

  // The usage ledger only has the consume; restocks never appear there.
  let usage = s.list_usage_events(Some(a.material_id), None).await.unwrap();
  assert_eq!(usage.len(), 1);
  assert_eq!(usage[0].quantity_consumed, 10.0);
}

#[tokio::test]
async fn delete_material_with_restocks_is_refused() {
  let s = store().await;
  let material = s.add_material(paper(50.0, 100.0)).await.unwrap();
  s.record_restock(material.material_id, 100.0, None)
    .await
    .unwrap();

  let err = s.delete_material(material.material_id).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::MaterialInUse(_))));
}

#[tokio::test]
async fn list_usage_events_filters_and_orders() {
  let s = store().await;
  let a = s.add_material(paper(500.0, 100.0)).await.unwrap();
  let mut other = paper(500.0, 100.0);
  other.name = "120gsm A3".into();
  let b = s.add_material(other).await.unwrap();

  let old = NewUsageEvent {
    material_id:       a.material_id,
    quantity_consumed: 10.0,
    occurred_at:       Some(Utc::now() - Duration::days(40)),
    note:              None,
  };
  s.record_usage(old).await.unwrap();
  s.record_usage(consume(a.material_id, 20.0)).await.unwrap();
  s.record_usage(consume(b.material_id, 30.0)).await.unwrap();

  let all = s.list_usage_events(None, None).await.unwrap();
  assert_eq!(all.len(), 3);

  let for_a = s
    .list_usage_events(Some(a.material_id), None)
    .await
    .unwrap();
  assert_eq!(for_a.len(), 2);
  // Newest first.
  assert_eq!(for_a[0].quantity_consumed, 20.0);

  let recent = s
    .list_usage_events(Some(a.material_id), Some(Utc::now() - Duration::days(30)))
    .await
    .unwrap();
  assert_eq!(recent.len(), 1);
  assert_eq!(recent[0].quantity_consumed, 20.0);
}

#[tokio::test]
async fn usage_feeds_stock_overview() {
  let s = store().await;
  let material = s.add_material(paper(8.0, 10.0)).await.unwrap();

  // 60 sheets over the window -> 2/day -> 4 days of stock left.
  let event = NewUsageEvent {
    material_id:       material.material_id,
    quantity_consumed: 60.0,
    occurred_at:       Some(Utc::now() - Duration::days(3)),
    note:              Some("job 1042".into()),
  };
  s.record_usage(event).await.unwrap();

  let materials = s.list_materials().await.unwrap();
  let events = s.list_usage_events(None, None).await.unwrap();
  let overview = stock_overview(materials, &events, 30, Utc::now());

  assert_eq!(overview.len(), 1);
  // On hand dropped to 0 after the consume, so the projection bottoms out.
  assert_eq!(overview[0].health.status, StockStatus::Critical);
  assert!((overview[0].daily_usage_rate - 2.0).abs() < 1e-9);
  assert_eq!(overview[0].health.rounded_days(), 0);
}

// ─── Products ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn product_crud_round_trip() {
  let s = store().await;

  let product = s
    .add_product(NewProduct {
      name:        "Business cards (500)".into(),
      description: Some("350gsm matte".into()),
      unit_price:  dec!(45.00),
      active:      true,
    })
    .await
    .unwrap();

  let fetched = s.get_product(product.product_id).await.unwrap().unwrap();
  assert_eq!(fetched.unit_price, dec!(45.00));

  let retired = s
    .update_product(product.product_id, ProductUpdate {
      active: Some(false),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(!retired.active);

  assert!(s.list_products(true).await.unwrap().is_empty());
  assert_eq!(s.list_products(false).await.unwrap().len(), 1);

  s.delete_product(product.product_id).await.unwrap();
  assert!(s.get_product(product.product_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_product_missing_fails() {
  let s = store().await;
  let err = s.delete_product(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::ProductNotFound(_))));
}

// ─── Invoices and payments ───────────────────────────────────────────────────

#[tokio::test]
async fn new_invoice_reads_unpaid() {
  let s = store().await;
  let created = s.add_invoice(invoice(dec!(120.00))).await.unwrap();

  let view = s.get_invoice(created.invoice_id).await.unwrap().unwrap();
  assert_eq!(view.paid, Decimal::ZERO);
  assert_eq!(view.payment_status, PaymentStatus::Unpaid);
}

#[tokio::test]
async fn payments_drive_derived_status() {
  let s = store().await;
  let created = s.add_invoice(invoice(dec!(120.00))).await.unwrap();

  s.add_payment(created.invoice_id, cash(dec!(40.00)))
    .await
    .unwrap();
  let view = s.get_invoice(created.invoice_id).await.unwrap().unwrap();
  assert_eq!(view.paid, dec!(40.00));
  assert_eq!(view.payment_status, PaymentStatus::Partial);

  s.add_payment(created.invoice_id, cash(dec!(80.00)))
    .await
    .unwrap();
  let view = s.get_invoice(created.invoice_id).await.unwrap().unwrap();
  assert_eq!(view.paid, dec!(120.00));
  assert_eq!(view.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn list_invoices_carries_paid_sums() {
  let s = store().await;
  let first = s.add_invoice(invoice(dec!(100.00))).await.unwrap();
  let second = s.add_invoice(invoice(dec!(50.00))).await.unwrap();
  s.add_payment(second.invoice_id, cash(dec!(50.00)))
    .await
    .unwrap();

  let views = s.list_invoices().await.unwrap();
  assert_eq!(views.len(), 2);

  let by_id = |id| {
    views
      .iter()
      .find(|view| view.invoice.invoice_id == id)
      .unwrap()
  };
  assert_eq!(by_id(first.invoice_id).payment_status, PaymentStatus::Unpaid);
  assert_eq!(by_id(second.invoice_id).payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn add_payment_rejects_non_positive_amount() {
  let s = store().await;
  let created = s.add_invoice(invoice(dec!(120.00))).await.unwrap();

  let err = s
    .add_payment(created.invoice_id, cash(Decimal::ZERO))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::NonPositiveAmount(_))));
}

#[tokio::test]
async fn add_payment_unknown_invoice_fails() {
  let s = store().await;
  let err = s
    .add_payment(Uuid::new_v4(), cash(dec!(10.00)))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::InvoiceNotFound(_))));
}

#[tokio::test]
async fn delete_invoice_with_payments_is_refused() {
  let s = store().await;
  let created = s.add_invoice(invoice(dec!(120.00))).await.unwrap();
  s.add_payment(created.invoice_id, cash(dec!(20.00)))
    .await
    .unwrap();

  let err = s.delete_invoice(created.invoice_id).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::InvoiceHasPayments(_))));

  let other = s.add_invoice(invoice(dec!(10.00))).await.unwrap();
  s.delete_invoice(other.invoice_id).await.unwrap();
  assert!(s.get_invoice(other.invoice_id).await.unwrap().is_none());
}

// ─── Staff ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn staff_lifecycle() {
  let s = store().await;

  let member = s
    .add_staff(NewStaffMember {
      name:       "Dana Reyes".into(),
      role_title: "press operator".into(),
      email:      Some("dana@example.com".into()),
    })
    .await
    .unwrap();
  assert!(member.active);

  let deactivated = s
    .update_staff(member.staff_id, StaffUpdate {
      active: Some(false),
      ..Default::default()
    })
    .await
    .unwrap();
  assert!(!deactivated.active);

  assert!(s.list_staff(true).await.unwrap().is_empty());
  assert_eq!(s.list_staff(false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_staff_missing_fails() {
  let s = store().await;
  let err = s
    .update_staff(Uuid::new_v4(), StaffUpdate::default())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::StaffNotFound(_))));
}

// ─── Settings ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn settings_put_get_overwrite() {
  let s = store().await;

  assert!(s.get_setting(settings::SHOP_NAME).await.unwrap().is_none());

  s.put_setting(settings::SHOP_NAME, "Riverside Print Co")
    .await
    .unwrap();
  s.put_setting(settings::CURRENCY_CODE, "EUR").await.unwrap();
  s.put_setting(settings::SHOP_NAME, "Riverside Print & Sign")
    .await
    .unwrap();

  let name = s.get_setting(settings::SHOP_NAME).await.unwrap().unwrap();
  assert_eq!(name.value, "Riverside Print & Sign");

  let all = s.list_settings().await.unwrap();
  assert_eq!(all.len(), 2);
}

// ─── Notifications ───────────────────────────────────────────────────────────

#[tokio::test]
async fn notifications_unread_then_read() {
  let s = store().await;

  let first = s
    .push_notification(NewNotification {
      title: "Low stock".into(),
      body:  "80gsm A4 is below its reorder threshold".into(),
    })
    .await
    .unwrap();
  s.push_notification(NewNotification {
    title: "Invoice paid".into(),
    body:  "Harbor Cafe settled invoice 1042".into(),
  })
  .await
  .unwrap();

  assert_eq!(s.list_notifications(true).await.unwrap().len(), 2);

  let read = s
    .mark_notification_read(first.notification_id)
    .await
    .unwrap();
  assert!(read.read);

  assert_eq!(s.list_notifications(true).await.unwrap().len(), 1);
  assert_eq!(s.list_notifications(false).await.unwrap().len(), 2);

  // Marking twice is harmless.
  s.mark_notification_read(first.notification_id)
    .await
    .unwrap();
}

#[tokio::test]
async fn mark_unknown_notification_fails() {
  let s = store().await;
  let err = s.mark_notification_read(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, Error::Core(CoreError::NotificationNotFound(_))));
}
