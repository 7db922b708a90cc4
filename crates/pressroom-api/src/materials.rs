//! Handlers for `/materials` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/materials` | All materials, ordered by name |
//! | `POST`   | `/materials` | Body: [`NewMaterial`]; returns 201 |
//! | `GET`    | `/materials/:id` | 404 if not found |
//! | `PUT`    | `/materials/:id` | Body: [`MaterialUpdate`] |
//! | `DELETE` | `/materials/:id` | 409 while usage events reference it |
//! | `POST`   | `/materials/:id/consume` | Body: [`ConsumeBody`] |
//! | `POST`   | `/materials/:id/restock` | Body: [`RestockBody`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use pressroom_core::{
  material::{Material, MaterialUpdate, NewMaterial},
  store::ShopStore,
  usage::{NewUsageEvent, UsageEvent},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List / create ───────────────────────────────────────────────────────────

/// `GET /materials`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Material>>, ApiError>
where
  S: ShopStore,
{
  let materials = store.list_materials().await.map_err(ApiError::from_store)?;
  Ok(Json(materials))
}

/// `POST /materials` — returns 201 + the stored material.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewMaterial>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ShopStore,
{
  let material = store.add_material(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(material)))
}

// ─── Get / update / delete ───────────────────────────────────────────────────

/// `GET /materials/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Material>, ApiError>
where
  S: ShopStore,
{
  let material = store
    .get_material(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("material {id} not found")))?;
  Ok(Json(material))
}

/// `PUT /materials/:id` — partial update, absent fields untouched.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<MaterialUpdate>,
) -> Result<Json<Material>, ApiError>
where
  S: ShopStore,
{
  let material = store
    .update_material(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(material))
}

/// `DELETE /materials/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ShopStore,
{
  store
    .delete_material(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Stock movement ──────────────────────────────────────────────────────────

/// JSON body accepted by `POST /materials/:id/consume`.
#[derive(Debug, Deserialize)]
pub struct ConsumeBody {
  pub quantity_consumed: f64,
  /// Defaults to now when absent.
  pub occurred_at:       Option<DateTime<Utc>>,
  pub note:              Option<String>,
}

/// `POST /materials/:id/consume` — records a usage event and decrements
/// on-hand stock, floored at zero. Returns 201 + the stored event.
pub async fn consume<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ConsumeBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ShopStore,
{
  let event: UsageEvent = store
    .record_usage(NewUsageEvent {
      material_id:       id,
      quantity_consumed: body.quantity_consumed,
      occurred_at:       body.occurred_at,
      note:              body.note,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(event)))
}

/// JSON body accepted by `POST /materials/:id/restock`.
#[derive(Debug, Deserialize)]
pub struct RestockBody {
  pub quantity: f64,
  pub note:     Option<String>,
}

/// `POST /materials/:id/restock` — appends to the restock ledger and
/// returns the material with its new on-hand quantity.
pub async fn restock<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<RestockBody>,
) -> Result<Json<Material>, ApiError>
where
  S: ShopStore,
{
  let material = store
    .record_restock(id, body.quantity, body.note)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(material))
}
