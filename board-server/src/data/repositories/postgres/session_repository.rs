use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::session_repository::{NewSession, SessionRepository};
use crate::domain::error::DomainError;
use crate::domain::session::Session;

#[derive(Debug, Clone)]
pub(crate) struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRow {
    token: String,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            token: row.token,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create_session(&self, input: NewSession) -> Result<Session, DomainError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (token, user_id)
            VALUES ($1, $2)
            RETURNING token, user_id, created_at
            "#,
        )
        .bind(&input.token)
        .bind(input.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_session_db_error)?;

        Ok(row.into())
    }

    async fn find_session(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT token, user_id, created_at
            FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_session_db_error)?;

        Ok(row.map(Session::from))
    }

    async fn delete_session(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(map_session_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_sessions_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sessions WHERE created_at <= $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(map_session_db_error)?;

        Ok(result.rows_affected())
    }
}

fn map_session_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("user".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
