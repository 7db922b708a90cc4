//! Usage events and the trailing-window usage aggregator.
//!
//! A usage event is an immutable record of consumption — once written it is
//! never updated. The aggregator folds a batch of events into a per-material
//! daily rate over a trailing window; the result is recomputed on every read
//! and never persisted.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trailing window the inventory screens use when none is given.
pub const DEFAULT_USAGE_WINDOW_DAYS: u32 = 30;

// ─── Events ──────────────────────────────────────────────────────────────────

/// An immutable record of stock being consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageEvent {
  pub event_id:          Uuid,
  pub material_id:       Uuid,
  pub quantity_consumed: f64,
  pub occurred_at:       DateTime<Utc>,
  /// Free text, e.g. the job number the material went into.
  pub note:              Option<String>,
}

/// Input to [`crate::store::ShopStore::record_usage`].
/// `occurred_at` defaults to the store's clock when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUsageEvent {
  pub material_id:       Uuid,
  pub quantity_consumed: f64,
  pub occurred_at:       Option<DateTime<Utc>>,
  pub note:              Option<String>,
}

/// An immutable record of stock being replenished. Restocks keep their own
/// ledger, separate from consumption, so they never enter the usage
/// aggregate below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestockEvent {
  pub restock_id:     Uuid,
  pub material_id:    Uuid,
  pub quantity_added: f64,
  pub occurred_at:    DateTime<Utc>,
  /// Free text, e.g. the supplier order number.
  pub note:           Option<String>,
}

// ─── Aggregation ─────────────────────────────────────────────────────────────

/// Sum consumption per material over the trailing window and divide by the
/// window length to get a daily rate.
///
/// Events outside `[now - window_days, now]` are ignored. A recorded
/// quantity that is negative or non-finite contributes 0 rather than
/// poisoning the sum. Materials with no in-window events are absent from
/// the map; callers treat absent as rate 0.
///
/// The fold is commutative — event order never affects the result.
pub fn aggregate_usage(
  events: &[UsageEvent],
  window_days: u32,
  now: DateTime<Utc>,
) -> HashMap<Uuid, f64> {
  let window_days = window_days.max(1);
  let window_start = now - Duration::days(i64::from(window_days));

  let mut totals: HashMap<Uuid, f64> = HashMap::new();
  for event in events {
    if event.occurred_at < window_start || event.occurred_at > now {
      continue;
    }
    let qty = if event.quantity_consumed.is_finite() {
      event.quantity_consumed.max(0.0)
    } else {
      0.0
    };
    *totals.entry(event.material_id).or_insert(0.0) += qty;
  }

  let days = f64::from(window_days);
  totals.values_mut().for_each(|total| *total /= days);
  totals
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn event(material_id: Uuid, qty: f64, days_ago: i64) -> UsageEvent {
    UsageEvent {
      event_id:          Uuid::new_v4(),
      material_id,
      quantity_consumed: qty,
      occurred_at:       Utc::now() - Duration::days(days_ago),
      note:              None,
    }
  }

  #[test]
  fn single_event_inside_window() {
    // 30 consumed 5 days ago over a 30-day window -> 1.0/day.
    let id = Uuid::new_v4();
    let rates = aggregate_usage(&[event(id, 30.0, 5)], 30, Utc::now());
    assert_eq!(rates.len(), 1);
    assert!((rates[&id] - 1.0).abs() < 1e-9);
  }

  #[test]
  fn sums_per_material_within_window() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let events = vec![
      event(a, 15.0, 1),
      event(a, 15.0, 10),
      event(b, 60.0, 2),
    ];
    let rates = aggregate_usage(&events, 30, Utc::now());
    assert!((rates[&a] - 1.0).abs() < 1e-9);
    assert!((rates[&b] - 2.0).abs() < 1e-9);
  }

  #[test]
  fn events_outside_window_are_excluded() {
    let id = Uuid::new_v4();
    let events = vec![event(id, 30.0, 5), event(id, 900.0, 45)];
    let rates = aggregate_usage(&events, 30, Utc::now());
    assert!((rates[&id] - 1.0).abs() < 1e-9);
  }

  #[test]
  fn future_events_are_excluded() {
    let id = Uuid::new_v4();
    let rates = aggregate_usage(&[event(id, 30.0, -2)], 30, Utc::now());
    assert!(rates.is_empty());
  }

  #[test]
  fn no_events_means_empty_map() {
    let rates = aggregate_usage(&[], 30, Utc::now());
    assert!(rates.is_empty());
  }

  #[test]
  fn permuting_events_does_not_change_output() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let mut events = vec![
      event(a, 3.0, 1),
      event(b, 7.0, 3),
      event(a, 12.0, 8),
      event(a, 6.0, 20),
    ];
    let now = Utc::now();
    let forward = aggregate_usage(&events, 30, now);
    events.reverse();
    let reversed = aggregate_usage(&events, 30, now);
    assert_eq!(forward, reversed);
  }

  #[test]
  fn malformed_quantities_contribute_zero() {
    let id = Uuid::new_v4();
    let events = vec![
      event(id, f64::NAN, 1),
      event(id, -5.0, 2),
      event(id, 30.0, 3),
    ];
    let rates = aggregate_usage(&events, 30, Utc::now());
    assert!((rates[&id] - 1.0).abs() < 1e-9);
  }
}
