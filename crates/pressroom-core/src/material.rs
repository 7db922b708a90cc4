//! Material — a consumable the shop keeps on hand (paper, ink, vinyl…).
//!
//! A material owns its identity and current stock numbers. Everything the
//! inventory screens derive from those numbers (status, stockout projection)
//! lives in [`crate::health`] and is never written back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stocked consumable.
///
/// `current_quantity` and `reorder_threshold` are non-negative by
/// construction — the store floors them at zero. A threshold of 0 means
/// "never reorder".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
  pub material_id:       Uuid,
  pub name:              String,
  /// Free-text grouping, e.g. "paper", "ink", "finishing".
  pub category:          Option<String>,
  /// Display unit of measure (sheets, litres, rolls). No semantic effect on
  /// any computation.
  pub unit:              String,
  pub current_quantity:  f64,
  pub reorder_threshold: f64,
  pub unit_cost:         Decimal,
  pub supplier:          Option<String>,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

/// Input to [`crate::store::ShopStore::add_material`].
/// Identity and timestamps are assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMaterial {
  pub name:              String,
  pub category:          Option<String>,
  pub unit:              String,
  #[serde(default)]
  pub current_quantity:  f64,
  #[serde(default)]
  pub reorder_threshold: f64,
  pub unit_cost:         Decimal,
  pub supplier:          Option<String>,
}

/// Partial update for a material. `None` fields are left untouched.
/// Stock movements do not go through here — see
/// [`crate::store::ShopStore::record_usage`] and `record_restock`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialUpdate {
  pub name:              Option<String>,
  pub category:          Option<Option<String>>,
  pub unit:              Option<String>,
  pub reorder_threshold: Option<f64>,
  pub unit_cost:         Option<Decimal>,
  pub supplier:          Option<Option<String>>,
}
