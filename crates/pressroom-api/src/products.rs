//! Handlers for `/products` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use pressroom_core::{
  catalog::{NewProduct, Product, ProductUpdate},
  store::ShopStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// If `true`, hide retired products. Default `false`.
  #[serde(default)]
  pub active_only: bool,
}

/// `GET /products[?active_only=true]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>, ApiError>
where
  S: ShopStore,
{
  let products = store
    .list_products(params.active_only)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(products))
}

/// `POST /products` — returns 201 + the stored product.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewProduct>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ShopStore,
{
  let product = store.add_product(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /products/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError>
where
  S: ShopStore,
{
  let product = store
    .get_product(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("product {id} not found")))?;
  Ok(Json(product))
}

/// `PUT /products/:id` — partial update, absent fields untouched.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ProductUpdate>,
) -> Result<Json<Product>, ApiError>
where
  S: ShopStore,
{
  let product = store
    .update_product(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(product))
}

/// `DELETE /products/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ShopStore,
{
  store.delete_product(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
