use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone)]
pub(crate) struct Session {
    pub(crate) token: String,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

impl Session {
    pub(crate) fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        self.created_at + ttl <= now
    }
}
