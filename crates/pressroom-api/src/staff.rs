//! Handlers for `/staff` endpoints. Staff rows are deactivated via PUT,
//! never deleted.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use pressroom_core::{
  staff::{NewStaffMember, StaffMember, StaffUpdate},
  store::ShopStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// If `true`, hide deactivated members. Default `false`.
  #[serde(default)]
  pub active_only: bool,
}

/// `GET /staff[?active_only=true]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<StaffMember>>, ApiError>
where
  S: ShopStore,
{
  let members = store
    .list_staff(params.active_only)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(members))
}

/// `POST /staff` — returns 201 + the stored member (active by default).
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewStaffMember>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ShopStore,
{
  let member = store.add_staff(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(member)))
}

/// `GET /staff/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<StaffMember>, ApiError>
where
  S: ShopStore,
{
  let member = store
    .get_staff(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("staff member {id} not found")))?;
  Ok(Json(member))
}

/// `PUT /staff/:id` — partial update, absent fields untouched.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<StaffUpdate>,
) -> Result<Json<StaffMember>, ApiError>
where
  S: ShopStore,
{
  let member = store
    .update_staff(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(member))
}
