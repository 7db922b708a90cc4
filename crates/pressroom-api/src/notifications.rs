//! Handlers for `/notifications` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use pressroom_core::{
  notification::{NewNotification, Notification},
  store::ShopStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// If `true`, only unread notifications. Default `false`.
  #[serde(default)]
  pub unread_only: bool,
}

/// `GET /notifications[?unread_only=true]` — newest first.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Notification>>, ApiError>
where
  S: ShopStore,
{
  let notifications = store
    .list_notifications(params.unread_only)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(notifications))
}

/// `POST /notifications` — returns 201 + the stored (unread) notification.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewNotification>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ShopStore,
{
  let notification = store
    .push_notification(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(notification)))
}

/// `POST /notifications/:id/read` — idempotent.
pub async fn mark_read<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Notification>, ApiError>
where
  S: ShopStore,
{
  let notification = store
    .mark_notification_read(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(notification))
}
