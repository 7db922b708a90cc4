//! Error type for `pressroom-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] pressroom_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("decimal parse error: {0}")]
  DecimalParse(String),

  #[error("unknown payment method: {0:?}")]
  UnknownPaymentMethod(String),
}

impl pressroom_core::StoreError for Error {
  fn kind(&self) -> pressroom_core::ErrorKind {
    use pressroom_core::{ErrorKind, StoreError as _};
    match self {
      Self::Core(e) => e.kind(),
      _ => ErrorKind::Internal,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
