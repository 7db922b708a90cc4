//! Products — the sellable catalogue (business cards, banners, flyers…).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub product_id:  Uuid,
  pub name:        String,
  pub description: Option<String>,
  pub unit_price:  Decimal,
  pub active:      bool,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input to [`crate::store::ShopStore::add_product`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
  pub name:        String,
  pub description: Option<String>,
  pub unit_price:  Decimal,
  #[serde(default = "default_active")]
  pub active:      bool,
}

fn default_active() -> bool { true }

/// Partial update for a product. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
  pub name:        Option<String>,
  pub description: Option<Option<String>>,
  pub unit_price:  Option<Decimal>,
  pub active:      Option<bool>,
}
