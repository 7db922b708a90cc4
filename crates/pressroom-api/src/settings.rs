//! Handlers for `/settings` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use pressroom_core::{settings::Setting, store::ShopStore};
use serde::Deserialize;

use crate::error::ApiError;

/// `GET /settings`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Setting>>, ApiError>
where
  S: ShopStore,
{
  let all = store.list_settings().await.map_err(ApiError::from_store)?;
  Ok(Json(all))
}

#[derive(Debug, Deserialize)]
pub struct PutBody {
  pub value: String,
}

/// `PUT /settings/:key` — body: `{"value":"..."}`. Upserts.
pub async fn put_one<S>(
  State(store): State<Arc<S>>,
  Path(key): Path<String>,
  Json(body): Json<PutBody>,
) -> Result<Json<Setting>, ApiError>
where
  S: ShopStore,
{
  let setting = store
    .put_setting(&key, &body.value)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(setting))
}
