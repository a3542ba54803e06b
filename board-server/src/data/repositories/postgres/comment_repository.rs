use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::post_repository::lock_visible_post;
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    author_user_id: i64,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            author_id: row.author_user_id,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create_comment(&self, input: NewComment) -> Result<Option<Comment>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_comment_db_error)?;

        let visible = lock_visible_post(&mut tx, input.post_id)
            .await
            .map_err(map_comment_db_error)?;
        if !visible {
            tx.rollback().await.map_err(map_comment_db_error)?;
            return Ok(None);
        }

        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, author_user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, author_user_id, content, created_at, updated_at
            "#,
        )
        .bind(input.post_id)
        .bind(input.author_id)
        .bind(&input.content)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_comment_db_error)?;

        tx.commit().await.map_err(map_comment_db_error)?;
        Ok(Some(Comment::from(row)))
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.post_id, c.author_user_id, c.content, c.created_at, c.updated_at
            FROM comments c
            JOIN users u ON u.id = c.author_user_id
            WHERE c.id = $1 AND c.deleted_at IS NULL AND u.deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(row.map(Comment::from))
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.post_id, c.author_user_id, c.content, c.created_at, c.updated_at
            FROM comments c
            JOIN users u ON u.id = c.author_user_id
            WHERE c.post_id = $1 AND c.deleted_at IS NULL AND u.deleted_at IS NULL
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn update_comment_owned(
        &self,
        comment_id: i64,
        owner_id: i64,
        content: String,
    ) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET content = $3,
                updated_at = NOW()
            WHERE id = $1 AND author_user_id = $2 AND deleted_at IS NULL
            RETURNING id, post_id, author_user_id, content, created_at, updated_at
            "#,
        )
        .bind(comment_id)
        .bind(owner_id)
        .bind(&content)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(row.map(Comment::from))
    }

    async fn soft_delete_comment(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_comment_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("post".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
