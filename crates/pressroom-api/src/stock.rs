//! Handlers for the derived stock-health endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/usage` | Optional `material_id`, `since` filters |
//! | `GET`  | `/restocks` | Optional `material_id` filter |
//! | `GET`  | `/stock/overview` | Every material + rate + health |
//! | `GET`  | `/stock/alerts` | Critical/low only, most urgent first |
//!
//! Overview and alerts fetch materials and the trailing window of usage
//! events, then run the aggregator and classifier over the in-memory
//! batch. Nothing derived is written back.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, Duration, Utc};
use pressroom_core::{
  health::{MaterialHealth, stock_alerts, stock_overview},
  settings::USAGE_WINDOW_DAYS,
  store::ShopStore,
  usage::{DEFAULT_USAGE_WINDOW_DAYS, RestockEvent, UsageEvent},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── Usage events ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct UsageParams {
  pub material_id: Option<Uuid>,
  /// Lower bound on `occurred_at`.
  pub since:       Option<DateTime<Utc>>,
}

/// `GET /usage[?material_id=...][&since=...]`
pub async fn usage_list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<UsageParams>,
) -> Result<Json<Vec<UsageEvent>>, ApiError>
where
  S: ShopStore,
{
  let events = store
    .list_usage_events(params.material_id, params.since)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(events))
}

#[derive(Debug, Deserialize, Default)]
pub struct RestockParams {
  pub material_id: Option<Uuid>,
}

/// `GET /restocks[?material_id=...]`
pub async fn restock_list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<RestockParams>,
) -> Result<Json<Vec<RestockEvent>>, ApiError>
where
  S: ShopStore,
{
  let events = store
    .list_restock_events(params.material_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(events))
}

// ─── Overview and alerts ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct WindowParams {
  /// Trailing window length; falls back to the shop setting, then to the
  /// 30-day default.
  pub window_days: Option<u32>,
}

/// Resolve the effective window: query param, then the stored setting,
/// then the built-in default.
async fn resolve_window<S>(store: &S, param: Option<u32>) -> Result<u32, ApiError>
where
  S: ShopStore,
{
  if let Some(days) = param {
    return Ok(days.max(1));
  }

  let configured = store
    .get_setting(USAGE_WINDOW_DAYS)
    .await
    .map_err(ApiError::from_store)?
    .and_then(|setting| setting.value.parse::<u32>().ok());

  Ok(configured.unwrap_or(DEFAULT_USAGE_WINDOW_DAYS).max(1))
}

async fn fetch_inputs<S>(
  store: &S,
  window_days: u32,
  now: DateTime<Utc>,
) -> Result<
  (Vec<pressroom_core::material::Material>, Vec<UsageEvent>),
  ApiError,
>
where
  S: ShopStore,
{
  let materials = store.list_materials().await.map_err(ApiError::from_store)?;
  let since = now - Duration::days(i64::from(window_days));
  let events = store
    .list_usage_events(None, Some(since))
    .await
    .map_err(ApiError::from_store)?;
  Ok((materials, events))
}

/// `GET /stock/overview[?window_days=30]`
pub async fn overview<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<WindowParams>,
) -> Result<Json<Vec<MaterialHealth>>, ApiError>
where
  S: ShopStore,
{
  let now = Utc::now();
  let window_days = resolve_window(store.as_ref(), params.window_days).await?;
  let (materials, events) =
    fetch_inputs(store.as_ref(), window_days, now).await?;
  Ok(Json(stock_overview(materials, &events, window_days, now)))
}

/// `GET /stock/alerts[?window_days=30]`
pub async fn alerts<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<WindowParams>,
) -> Result<Json<Vec<MaterialHealth>>, ApiError>
where
  S: ShopStore,
{
  let now = Utc::now();
  let window_days = resolve_window(store.as_ref(), params.window_days).await?;
  let (materials, events) =
    fetch_inputs(store.as_ref(), window_days, now).await?;
  Ok(Json(stock_alerts(materials, &events, window_days, now)))
}
