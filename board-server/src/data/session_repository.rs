use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::session::Session;

#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub(crate) token: String,
    pub(crate) user_id: i64,
}

#[async_trait]
pub(crate) trait SessionRepository: Send + Sync {
    async fn create_session(&self, input: NewSession) -> Result<Session, DomainError>;
    async fn find_session(&self, token: &str) -> Result<Option<Session>, DomainError>;
    async fn delete_session(&self, token: &str) -> Result<bool, DomainError>;
    /// Drops every session created at or before `cutoff`; returns how many.
    async fn delete_sessions_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DomainError>;
}
