use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{Customer, LineItem};

// ============================================================================
// Order Entity
// ============================================================================

/// A validated order submission that has not been persisted yet.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewOrder {
    pub items: Vec<LineItem>,
    pub customer: Customer,
    pub total: f64,
}

/// A persisted order. `id` and the timestamps are assigned by the store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub items: Vec<LineItem>,
    pub customer: Customer,
    pub total: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Builds the stored form of `new` with a fresh time-ordered id.
    ///
    /// Timestamps are truncated to milliseconds, the resolution the store
    /// keeps, so the returned order matches what a later read yields.
    pub fn assign(new: NewOrder, now: DateTime<Utc>) -> Self {
        let now = truncate_to_millis(now);
        Self {
            id: Uuid::now_v7(),
            items: new.items,
            customer: new.customer,
            total: new.total,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}
