//! Error types for `pressroom-core`.

use thiserror::Error;
use uuid::Uuid;

/// Coarse classification a transport layer can map onto its own failure
/// vocabulary (HTTP status codes, exit codes) without knowing the concrete
/// backend error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  Conflict,
  InvalidInput,
  Internal,
}

/// Implemented by every store backend's error type.
pub trait StoreError: std::error::Error {
  fn kind(&self) -> ErrorKind;
}

/// Domain-rule failures. Backends raise these; infrastructure failures
/// (I/O, SQL, parsing) live in each backend's own error type.
#[derive(Debug, Error)]
pub enum Error {
  #[error("material not found: {0}")]
  MaterialNotFound(Uuid),

  #[error("product not found: {0}")]
  ProductNotFound(Uuid),

  #[error("invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("staff member not found: {0}")]
  StaffNotFound(Uuid),

  #[error("notification not found: {0}")]
  NotificationNotFound(Uuid),

  #[error("material {0} has recorded usage events and cannot be deleted")]
  MaterialInUse(Uuid),

  #[error("invoice {0} has recorded payments and cannot be deleted")]
  InvoiceHasPayments(Uuid),

  #[error("quantity must be positive, got {0}")]
  NonPositiveQuantity(f64),

  #[error("payment amount must be positive, got {0}")]
  NonPositiveAmount(rust_decimal::Decimal),
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::MaterialNotFound(_)
      | Self::ProductNotFound(_)
      | Self::InvoiceNotFound(_)
      | Self::StaffNotFound(_)
      | Self::NotificationNotFound(_) => ErrorKind::NotFound,
      Self::MaterialInUse(_) | Self::InvoiceHasPayments(_) => ErrorKind::Conflict,
      Self::NonPositiveQuantity(_) | Self::NonPositiveAmount(_) => {
        ErrorKind::InvalidInput
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
