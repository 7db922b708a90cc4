//! Staff records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
  pub staff_id:   Uuid,
  pub name:       String,
  /// Free-text role, e.g. "press operator", "front desk".
  pub role_title: String,
  pub email:      Option<String>,
  pub active:     bool,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::ShopStore::add_staff`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewStaffMember {
  pub name:       String,
  pub role_title: String,
  pub email:      Option<String>,
}

/// Partial update for a staff member. Deactivation goes through here;
/// staff rows are never deleted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaffUpdate {
  pub name:       Option<String>,
  pub role_title: Option<String>,
  pub email:      Option<Option<String>>,
  pub active:     Option<bool>,
}
