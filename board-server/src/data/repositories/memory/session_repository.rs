use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::MemoryStore;
use crate::data::session_repository::{NewSession, SessionRepository};
use crate::domain::error::DomainError;
use crate::domain::session::Session;

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn create_session(&self, input: NewSession) -> Result<Session, DomainError> {
        let mut state = self.lock()?;
        if !state.is_user_active(input.user_id) {
            return Err(DomainError::NotFound("user".to_string()));
        }

        let session = Session {
            token: input.token,
            user_id: input.user_id,
            created_at: Utc::now(),
        };
        state
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn find_session(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let state = self.lock()?;
        Ok(state.sessions.get(token).cloned())
    }

    async fn delete_session(&self, token: &str) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        Ok(state.sessions.remove(token).is_some())
    }

    async fn delete_sessions_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let mut state = self.lock()?;
        let before = state.sessions.len();
        state.sessions.retain(|_, session| session.created_at > cutoff);
        Ok((before - state.sessions.len()) as u64)
    }
}
