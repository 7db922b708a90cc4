//! Stock health — the derived classification behind the inventory screens.
//!
//! Classification is a pure function of `(current_quantity,
//! reorder_threshold, daily_usage_rate)`. It holds no state, is recomputed
//! fresh whenever the underlying numbers are re-fetched, and is never
//! written back to storage.

use serde::{Deserialize, Serialize};

use crate::{
  material::Material,
  usage::{UsageEvent, aggregate_usage},
};

// ─── Policy constants ────────────────────────────────────────────────────────

/// At or below this fraction of the reorder threshold, stock is critical.
pub const CRITICAL_FRACTION: f64 = 0.5;

/// Above this multiple of the reorder threshold, stock is overstocked.
pub const OVERSTOCK_MULTIPLIER: f64 = 3.0;

/// Stockout projection reported when the usage rate is zero — the
/// conventional "effectively infinite / not at risk" placeholder.
pub const STOCKOUT_SENTINEL_DAYS: f64 = 999.0;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Stock situation for a single material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
  Critical,
  Low,
  Healthy,
  Overstock,
}

impl StockStatus {
  /// True for the statuses the alerts screen surfaces.
  pub fn needs_attention(self) -> bool {
    matches!(self, Self::Critical | Self::Low)
  }
}

/// The classifier's output for one material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockHealth {
  pub status:              StockStatus,
  /// Projected days until on-hand reaches zero at the current usage rate,
  /// or [`STOCKOUT_SENTINEL_DAYS`] when the rate is zero.
  pub days_until_stockout: f64,
}

impl StockHealth {
  /// Projection rounded to the nearest whole day, for display.
  pub fn rounded_days(&self) -> i64 { self.days_until_stockout.round() as i64 }
}

// ─── Classifier ──────────────────────────────────────────────────────────────

/// Classify a single material's stock situation and project time to
/// stockout.
///
/// Branches are evaluated in order, first match wins:
///
/// 1. `quantity <= threshold * 0.5` → `Critical`
/// 2. `quantity <= threshold`       → `Low`
/// 3. `quantity > threshold * 3`    → `Overstock`
/// 4. otherwise                     → `Healthy`
///
/// With a zero threshold, any positive quantity classifies as `Overstock`
/// (the first two branches need `quantity <= 0`, and `0 * 3 == 0`). This
/// mirrors the long-standing shop rule set and is kept as-is; see
/// DESIGN.md.
///
/// Total over its numeric domain: negative inputs are clamped to zero,
/// no branch can fail, and equal inputs always produce equal output.
pub fn classify_stock(
  current_quantity: f64,
  reorder_threshold: f64,
  daily_usage_rate: f64,
) -> StockHealth {
  let quantity = current_quantity.max(0.0);
  let threshold = reorder_threshold.max(0.0);
  let rate = daily_usage_rate.max(0.0);

  let days_until_stockout = if rate > 0.0 {
    quantity / rate
  } else {
    STOCKOUT_SENTINEL_DAYS
  };

  let status = if quantity <= threshold * CRITICAL_FRACTION {
    StockStatus::Critical
  } else if quantity <= threshold {
    StockStatus::Low
  } else if quantity > threshold * OVERSTOCK_MULTIPLIER {
    StockStatus::Overstock
  } else {
    StockStatus::Healthy
  };

  StockHealth { status, days_until_stockout }
}

// ─── Derived read models ─────────────────────────────────────────────────────

/// One material joined with its derived numbers — the row shape the
/// inventory overview renders. Computed per request, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialHealth {
  pub material:         Material,
  pub daily_usage_rate: f64,
  pub health:           StockHealth,
}

/// Run the aggregator and the classifier over a full materials fetch.
///
/// Materials absent from the usage aggregate get rate 0.
pub fn stock_overview(
  materials: Vec<Material>,
  events: &[UsageEvent],
  window_days: u32,
  now: chrono::DateTime<chrono::Utc>,
) -> Vec<MaterialHealth> {
  let rates = aggregate_usage(events, window_days, now);

  materials
    .into_iter()
    .map(|material| {
      let rate = rates.get(&material.material_id).copied().unwrap_or(0.0);
      let health = classify_stock(
        material.current_quantity,
        material.reorder_threshold,
        rate,
      );
      MaterialHealth { material, daily_usage_rate: rate, health }
    })
    .collect()
}

/// The overview narrowed to materials needing attention, most urgent
/// first (fewest projected days to stockout).
pub fn stock_alerts(
  materials: Vec<Material>,
  events: &[UsageEvent],
  window_days: u32,
  now: chrono::DateTime<chrono::Utc>,
) -> Vec<MaterialHealth> {
  let mut alerts: Vec<MaterialHealth> =
    stock_overview(materials, events, window_days, now)
      .into_iter()
      .filter(|entry| entry.health.status.needs_attention())
      .collect();

  alerts.sort_by(|a, b| {
    a.health
      .days_until_stockout
      .total_cmp(&b.health.days_until_stockout)
  });
  alerts
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::{Duration, Utc};
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  use super::*;

  // ── Classifier ────────────────────────────────────────────────────────────

  #[test]
  fn classification_is_pure() {
    let first = classify_stock(12.0, 10.0, 0.4);
    let second = classify_stock(12.0, 10.0, 0.4);
    assert_eq!(first, second);
  }

  #[test]
  fn critical_at_half_threshold_boundary() {
    let health = classify_stock(5.0, 10.0, 1.0);
    assert_eq!(health.status, StockStatus::Critical);

    // Just above the half-threshold boundary drops to Low.
    let health = classify_stock(5.0 + 1e-9, 10.0, 1.0);
    assert_eq!(health.status, StockStatus::Low);
  }

  #[test]
  fn overstock_boundary_is_exclusive() {
    assert_eq!(classify_stock(31.0, 10.0, 1.0).status, StockStatus::Overstock);
    // Exactly 3x the threshold is still healthy.
    assert_eq!(classify_stock(30.0, 10.0, 1.0).status, StockStatus::Healthy);
  }

  #[test]
  fn zero_rate_reports_sentinel() {
    let health = classify_stock(50.0, 10.0, 0.0);
    assert_eq!(health.days_until_stockout, STOCKOUT_SENTINEL_DAYS);
    assert_eq!(health.rounded_days(), 999);
  }

  #[test]
  fn scenario_critically_low_with_projection() {
    let health = classify_stock(5.0, 10.0, 1.0);
    assert_eq!(health.status, StockStatus::Critical);
    assert_eq!(health.rounded_days(), 5);
  }

  #[test]
  fn scenario_low_with_projection() {
    let health = classify_stock(8.0, 10.0, 2.0);
    assert_eq!(health.status, StockStatus::Low);
    assert_eq!(health.rounded_days(), 4);
  }

  #[test]
  fn scenario_overstock_with_no_usage() {
    let health = classify_stock(35.0, 10.0, 0.0);
    assert_eq!(health.status, StockStatus::Overstock);
    assert_eq!(health.rounded_days(), 999);
  }

  #[test]
  fn scenario_healthy_midrange() {
    let health = classify_stock(15.0, 10.0, 0.5);
    assert_eq!(health.status, StockStatus::Healthy);
    assert_eq!(health.rounded_days(), 30);
  }

  #[test]
  fn zero_threshold_classifies_positive_stock_as_overstock() {
    // Long-standing rule-set quirk, kept deliberately.
    assert_eq!(classify_stock(1.0, 0.0, 0.0).status, StockStatus::Overstock);
    assert_eq!(classify_stock(0.0, 0.0, 0.0).status, StockStatus::Critical);
  }

  #[test]
  fn negative_inputs_are_clamped() {
    let health = classify_stock(-3.0, 10.0, -1.0);
    assert_eq!(health.status, StockStatus::Critical);
    assert_eq!(health.days_until_stockout, STOCKOUT_SENTINEL_DAYS);
  }

  // ── Overview composition ──────────────────────────────────────────────────

  fn material(quantity: f64, threshold: f64) -> Material {
    Material {
      material_id:       Uuid::new_v4(),
      name:              "80gsm A4".into(),
      category:          Some("paper".into()),
      unit:              "sheets".into(),
      current_quantity:  quantity,
      reorder_threshold: threshold,
      unit_cost:         dec!(0.02),
      supplier:          None,
      created_at:        Utc::now(),
      updated_at:        Utc::now(),
    }
  }

  fn usage(material_id: Uuid, qty: f64, days_ago: i64) -> UsageEvent {
    UsageEvent {
      event_id:          Uuid::new_v4(),
      material_id,
      quantity_consumed: qty,
      occurred_at:       Utc::now() - Duration::days(days_ago),
      note:              None,
    }
  }

  #[test]
  fn overview_joins_rates_and_defaults_to_zero() {
    let consumed = material(8.0, 10.0);
    let untouched = material(15.0, 10.0);
    let events = vec![usage(consumed.material_id, 60.0, 3)];

    let overview = stock_overview(
      vec![consumed.clone(), untouched.clone()],
      &events,
      30,
      Utc::now(),
    );

    let by_id = |id| {
      overview
        .iter()
        .find(|entry| entry.material.material_id == id)
        .unwrap()
    };

    let hot = by_id(consumed.material_id);
    assert!((hot.daily_usage_rate - 2.0).abs() < 1e-9);
    assert_eq!(hot.health.status, StockStatus::Low);
    assert_eq!(hot.health.rounded_days(), 4);

    let cold = by_id(untouched.material_id);
    assert_eq!(cold.daily_usage_rate, 0.0);
    assert_eq!(cold.health.status, StockStatus::Healthy);
    assert_eq!(cold.health.days_until_stockout, STOCKOUT_SENTINEL_DAYS);
  }

  #[test]
  fn alerts_filter_and_sort_by_urgency() {
    let critical = material(2.0, 10.0);
    let low = material(9.0, 10.0);
    let healthy = material(20.0, 10.0);
    let events = vec![
      usage(critical.material_id, 30.0, 2),  // 1/day -> 2 days left
      usage(low.material_id, 30.0, 4),       // 1/day -> 9 days left
      usage(healthy.material_id, 30.0, 1),
    ];

    let alerts = stock_alerts(
      vec![low.clone(), healthy, critical.clone()],
      &events,
      30,
      Utc::now(),
    );

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].material.material_id, critical.material_id);
    assert_eq!(alerts[1].material.material_id, low.material_id);
  }
}
