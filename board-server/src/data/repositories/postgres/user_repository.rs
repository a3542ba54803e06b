use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::data::user_repository::{NewUser, UserCredentials, UserPatch, UserRepository};
use crate::domain::error::{DomainError, UniqueField};
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    nickname: String,
    profile_image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct UserCredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

const USER_COLUMNS: &str = "id, email, nickname, profile_image_url, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (email, nickname, password_hash, profile_image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&input.email)
        .bind(&input.nickname)
        .bind(&input.password_hash)
        .bind(&input.profile_image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        map_row_to_user(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}, password_hash
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        if let Some(r) = row {
            Ok(Some(UserCredentials {
                user: map_row_to_user(r.user)?,
                password_hash: r.password_hash,
            }))
        } else {
            Ok(None)
        }
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE nickname = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(nickname)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_user).transpose()
    }

    async fn update_profile(&self, id: i64, patch: UserPatch) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET nickname = $2,
                profile_image_url = COALESCE($3, profile_image_url),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&patch.nickname)
        .bind(&patch.profile_image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_user).transpose()
    }

    async fn update_profile_image(
        &self,
        id: i64,
        profile_image_url: String,
    ) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET profile_image_url = $2,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&profile_image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_user).transpose()
    }

    async fn update_password(&self, id: i64, password_hash: String) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(&password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete_user(&self, id: i64) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_user_db_error)?;

        let deleted = sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_user_db_error)?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await.map_err(map_user_db_error)?;
            return Ok(false);
        }

        let sessions = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_user_db_error)?;

        sqlx::query("DELETE FROM post_likes WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_user_db_error)?;

        sqlx::query(
            r#"
            UPDATE comments
            SET deleted_at = NOW()
            WHERE deleted_at IS NULL
              AND (author_user_id = $1
                   OR post_id IN (SELECT id FROM posts WHERE author_user_id = $1))
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_user_db_error)?;

        let posts = sqlx::query(
            r#"
            UPDATE posts
            SET deleted_at = NOW()
            WHERE author_user_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_user_db_error)?;

        tx.commit().await.map_err(map_user_db_error)?;

        info!(
            user_id = id,
            sessions = sessions.rows_affected(),
            posts = posts.rows_affected(),
            "user soft-deleted with cascade"
        );
        Ok(true)
    }
}

fn map_row_to_user(row: UserRow) -> Result<User, DomainError> {
    User::new(
        row.id,
        row.email,
        row.nickname,
        row.profile_image_url,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        let field = match db_err.constraint() {
            Some("users_nickname_active_idx") => UniqueField::Nickname,
            _ => UniqueField::Email,
        };
        return DomainError::AlreadyExists(field);
    }
    DomainError::Unexpected(err.to_string())
}
