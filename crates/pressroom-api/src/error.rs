//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use pressroom_core::{ErrorKind, StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a backend error to the right HTTP failure via its
  /// [`ErrorKind`].
  pub fn from_store<E>(e: E) -> Self
  where
    E: StoreError + Send + Sync + 'static,
  {
    match e.kind() {
      ErrorKind::NotFound => Self::NotFound(e.to_string()),
      ErrorKind::Conflict => Self::Conflict(e.to_string()),
      ErrorKind::InvalidInput => Self::BadRequest(e.to_string()),
      ErrorKind::Internal => Self::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
