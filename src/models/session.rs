use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Server-side record of an issued token. Exactly one of `vendor_id` /
/// `user_id` is set. Rows are written at login and removed at logout; an
/// expired row may still be returned by lookups, callers decide what expiry
/// means.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionRecord {
    pub id: i64,
    pub token: String,
    pub user_id: Option<i64>,
    pub vendor_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|at| at <= now).unwrap_or(false)
    }
}
