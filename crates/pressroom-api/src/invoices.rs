//! Handlers for `/invoices` endpoints.
//!
//! Every invoice response is an [`InvoiceView`] — the stored row joined
//! with its paid sum and derived payment status. The status is computed on
//! each read, never persisted.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pressroom_core::{
  billing::{InvoiceView, NewInvoice, NewPayment, Payment},
  store::ShopStore,
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Invoices ────────────────────────────────────────────────────────────────

/// `GET /invoices` — newest issued first.
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<InvoiceView>>, ApiError>
where
  S: ShopStore,
{
  let views = store.list_invoices().await.map_err(ApiError::from_store)?;
  Ok(Json(views))
}

/// `POST /invoices` — returns 201 + the stored invoice as an unpaid view.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewInvoice>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ShopStore,
{
  let invoice = store.add_invoice(body).await.map_err(ApiError::from_store)?;
  let view = InvoiceView::new(invoice, rust_decimal::Decimal::ZERO);
  Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /invoices/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<InvoiceView>, ApiError>
where
  S: ShopStore,
{
  let view = store
    .get_invoice(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("invoice {id} not found")))?;
  Ok(Json(view))
}

/// `DELETE /invoices/:id` — 409 while payments reference it.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ShopStore,
{
  store.delete_invoice(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Payments ────────────────────────────────────────────────────────────────

/// `GET /invoices/:id/payments` — oldest first.
pub async fn payments_list<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Payment>>, ApiError>
where
  S: ShopStore,
{
  // Distinguish "no payments" from "no invoice".
  store
    .get_invoice(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("invoice {id} not found")))?;

  let payments = store
    .list_payments(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(payments))
}

/// `POST /invoices/:id/payments` — returns 201 + the refreshed invoice
/// view, so the caller sees the new derived status immediately.
pub async fn payments_create<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<NewPayment>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ShopStore,
{
  store
    .add_payment(id, body)
    .await
    .map_err(ApiError::from_store)?;

  let view = store
    .get_invoice(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("invoice {id} not found")))?;
  Ok((StatusCode::CREATED, Json(view)))
}
