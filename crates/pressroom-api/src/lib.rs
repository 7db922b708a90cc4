//! JSON REST API for the Pressroom back office.
//!
//! Exposes an axum [`Router`] backed by any [`pressroom_core::store::ShopStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", pressroom_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod invoices;
pub mod materials;
pub mod notifications;
pub mod products;
pub mod settings;
pub mod staff;
pub mod stock;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use pressroom_core::store::ShopStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ShopStore + 'static,
{
  Router::new()
    // Materials
    .route(
      "/materials",
      get(materials::list::<S>).post(materials::create::<S>),
    )
    .route(
      "/materials/{id}",
      get(materials::get_one::<S>)
        .put(materials::update_one::<S>)
        .delete(materials::delete_one::<S>),
    )
    .route("/materials/{id}/consume", post(materials::consume::<S>))
    .route("/materials/{id}/restock", post(materials::restock::<S>))
    // Stock health
    .route("/usage", get(stock::usage_list::<S>))
    .route("/restocks", get(stock::restock_list::<S>))
    .route("/stock/overview", get(stock::overview::<S>))
    .route("/stock/alerts", get(stock::alerts::<S>))
    // Products
    .route(
      "/products",
      get(products::list::<S>).post(products::create::<S>),
    )
    .route(
      "/products/{id}",
      get(products::get_one::<S>)
        .put(products::update_one::<S>)
        .delete(products::delete_one::<S>),
    )
    // Invoices and payments
    .route(
      "/invoices",
      get(invoices::list::<S>).post(invoices::create::<S>),
    )
    .route(
      "/invoices/{id}",
      get(invoices::get_one::<S>).delete(invoices::delete_one::<S>),
    )
    .route(
      "/invoices/{id}/payments",
      get(invoices::payments_list::<S>).post(invoices::payments_create::<S>),
    )
    // Staff
    .route("/staff", get(staff::list::<S>).post(staff::create::<S>))
    .route(
      "/staff/{id}",
      get(staff::get_one::<S>).put(staff::update_one::<S>),
    )
    // Settings
    .route("/settings", get(settings::list::<S>))
    .route("/settings/{key}", put(settings::put_one::<S>))
    // Notifications
    .route(
      "/notifications",
      get(notifications::list::<S>).post(notifications::create::<S>),
    )
    .route(
      "/notifications/{id}/read",
      post(notifications::mark_read::<S>),
    )
    .with_state(store)
}
