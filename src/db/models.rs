use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbSnippet {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

/// Row shape expected by SQLite-backed session stores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbSession {
    pub token: String,
    pub data: Vec<u8>,
    /// Seconds since the Unix epoch.
    pub expiry: f64,
}

impl DbSession {
    /// `None` for NaN, infinite or out-of-range expiries.
    pub fn expiry_at(&self) -> Option<DateTime<Utc>> {
        if !self.expiry.is_finite() {
            return None;
        }
        let floor = self.expiry.floor();
        if floor < i64::MIN as f64 || floor >= i64::MAX as f64 {
            return None;
        }
        let mut secs = floor as i64;
        let mut nanos = ((self.expiry - floor) * 1e9).round() as u32;
        if nanos >= 1_000_000_000 {
            secs = secs.checked_add(1)?;
            nanos = 0;
        }
        DateTime::from_timestamp(secs, nanos)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub created: DateTime<Utc>,
}
