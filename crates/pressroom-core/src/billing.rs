//! Invoices and payments.
//!
//! An invoice's payment status is never stored — it is derived from the sum
//! of its recorded payments on every read, the same recompute-on-fetch
//! discipline as [`crate::health`].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Invoices ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
  pub invoice_id:    Uuid,
  pub customer_name: String,
  pub issued_on:     NaiveDate,
  pub due_on:        NaiveDate,
  pub total:         Decimal,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::ShopStore::add_invoice`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
  pub customer_name: String,
  pub issued_on:     NaiveDate,
  pub due_on:        NaiveDate,
  pub total:         Decimal,
}

// ─── Payments ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
  Cash,
  Card,
  Transfer,
  Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
  pub payment_id:  Uuid,
  pub invoice_id:  Uuid,
  pub amount:      Decimal,
  pub method:      PaymentMethod,
  pub received_at: DateTime<Utc>,
}

/// Input to [`crate::store::ShopStore::add_payment`].
/// `received_at` defaults to the store's clock when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
  pub amount:      Decimal,
  pub method:      PaymentMethod,
  pub received_at: Option<DateTime<Utc>>,
}

// ─── Derived payment status ──────────────────────────────────────────────────

/// Where an invoice stands against its recorded payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
  Unpaid,
  Partial,
  Paid,
}

/// Derive the status from the invoice total and the paid-to-date sum.
///
/// Overpayment still reads as `Paid`; a zero-total invoice is `Paid` from
/// the start.
pub fn derive_payment_status(total: Decimal, paid: Decimal) -> PaymentStatus {
  if paid >= total {
    PaymentStatus::Paid
  } else if paid > Decimal::ZERO {
    PaymentStatus::Partial
  } else {
    PaymentStatus::Unpaid
  }
}

/// An invoice joined with its derived numbers — computed per request,
/// never stored.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceView {
  pub invoice:        Invoice,
  pub paid:           Decimal,
  pub payment_status: PaymentStatus,
}

impl InvoiceView {
  pub fn new(invoice: Invoice, paid: Decimal) -> Self {
    let payment_status = derive_payment_status(invoice.total, paid);
    Self { invoice, paid, payment_status }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use rust_decimal_macros::dec;

  use super::*;

  #[test]
  fn unpaid_when_nothing_received() {
    assert_eq!(
      derive_payment_status(dec!(120.00), Decimal::ZERO),
      PaymentStatus::Unpaid
    );
  }

  #[test]
  fn partial_between_zero_and_total() {
    assert_eq!(
      derive_payment_status(dec!(120.00), dec!(40.00)),
      PaymentStatus::Partial
    );
  }

  #[test]
  fn paid_at_exact_total() {
    assert_eq!(
      derive_payment_status(dec!(120.00), dec!(120.00)),
      PaymentStatus::Paid
    );
  }

  #[test]
  fn overpayment_still_reads_paid() {
    assert_eq!(
      derive_payment_status(dec!(120.00), dec!(150.00)),
      PaymentStatus::Paid
    );
  }

  #[test]
  fn zero_total_invoice_is_paid() {
    assert_eq!(
      derive_payment_status(Decimal::ZERO, Decimal::ZERO),
      PaymentStatus::Paid
    );
  }
}
