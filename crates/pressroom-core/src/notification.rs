//! Back-office notifications.
//!
//! A notification is a plain inserted record; how it reaches a screen
//! (polling, live query) is the consumer's concern, not modelled here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
  pub notification_id: Uuid,
  pub title:           String,
  pub body:            String,
  pub read:            bool,
  pub created_at:      DateTime<Utc>,
}

/// Input to [`crate::store::ShopStore::push_notification`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewNotification {
  pub title: String,
  pub body:  String,
}
