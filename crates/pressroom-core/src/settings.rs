//! Shop settings — a flat string key/value namespace.
//!
//! Well-known keys are exposed as constants so callers and the seed data
//! agree on spelling; unknown keys are allowed.

use serde::{Deserialize, Serialize};

pub const SHOP_NAME: &str = "shop_name";
pub const CURRENCY_CODE: &str = "currency_code";
pub const TAX_RATE_PERCENT: &str = "tax_rate_percent";
pub const USAGE_WINDOW_DAYS: &str = "usage_window_days";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
  pub key:   String,
  pub value: String,
}
