use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    author_user_id: i64,
    file_url: Option<String>,
    hits: i64,
    like_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            author_id: row.author_user_id,
            file_url: row.file_url,
            hits: row.hits,
            like_count: row.like_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const LIKE_COUNT: &str =
    "(SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id)::BIGINT AS like_count";

const VISIBLE_POST: &str = r#"
    p.deleted_at IS NULL
    AND EXISTS (
        SELECT 1 FROM users u
        WHERE u.id = p.author_user_id AND u.deleted_at IS NULL
    )
"#;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content, file_url, author_user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author_user_id, file_url, hits,
                      0::BIGINT AS like_count, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.file_url)
        .bind(input.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.into())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT p.id, p.title, p.content, p.author_user_id, p.file_url, p.hits,
                   {LIKE_COUNT}, p.created_at, p.updated_at
            FROM posts p
            WHERE p.id = $1 AND {VISIBLE_POST}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }

    async fn record_view(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            UPDATE posts p
            SET hits = p.hits + 1
            WHERE p.id = $1 AND {VISIBLE_POST}
            RETURNING p.id, p.title, p.content, p.author_user_id, p.file_url, p.hits,
                      {LIKE_COUNT}, p.created_at, p.updated_at
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            UPDATE posts p
            SET title = $3,
                content = $4,
                file_url = $5,
                updated_at = NOW()
            WHERE p.id = $1 AND p.author_user_id = $2 AND p.deleted_at IS NULL
            RETURNING p.id, p.title, p.content, p.author_user_id, p.file_url, p.hits,
                      {LIKE_COUNT}, p.created_at, p.updated_at
            "#
        ))
        .bind(post_id)
        .bind(owner_id)
        .bind(&patch.title)
        .bind(&patch.content)
        .bind(&patch.file_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }

    async fn soft_delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_post_db_error)?;

        let deleted = sqlx::query(
            r#"
            UPDATE posts
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await.map_err(map_post_db_error)?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            UPDATE comments
            SET deleted_at = NOW()
            WHERE post_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        tx.commit().await.map_err(map_post_db_error)?;
        Ok(true)
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT p.id, p.title, p.content, p.author_user_id, p.file_url, p.hits,
                   {LIKE_COUNT}, p.created_at, p.updated_at
            FROM posts p
            WHERE {VISIBLE_POST}
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $1
            OFFSET $2
            "#
        ))
        .bind(i64::from(pagination.limit))
        .bind(i64::from(pagination.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn total_posts(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(&format!(
            r#"
            SELECT COUNT(*)
            FROM posts p
            WHERE {VISIBLE_POST}
            "#
        ))
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)
    }

    async fn add_like(&self, post_id: i64, user_id: i64) -> Result<Option<i64>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_post_db_error)?;

        let visible = lock_visible_post(&mut tx, post_id)
            .await
            .map_err(map_post_db_error)?;

        if !visible {
            tx.rollback().await.map_err(map_post_db_error)?;
            return Ok(None);
        }

        sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        let count = count_likes(&mut tx, post_id).await?;
        tx.commit().await.map_err(map_post_db_error)?;
        Ok(Some(count))
    }

    async fn remove_like(&self, post_id: i64, user_id: i64) -> Result<Option<i64>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_post_db_error)?;

        let visible = lock_visible_post(&mut tx, post_id)
            .await
            .map_err(map_post_db_error)?;

        if !visible {
            tx.rollback().await.map_err(map_post_db_error)?;
            return Ok(None);
        }

        sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_post_db_error)?;

        let count = count_likes(&mut tx, post_id).await?;
        tx.commit().await.map_err(map_post_db_error)?;
        Ok(Some(count))
    }
}

/// Share-locks a visible post and its author until the transaction ends, so a
/// concurrent post or account deletion waits and its cascade sees our writes.
const LOCK_VISIBLE_POST: &str = r#"
    SELECT p.id
    FROM posts p
    JOIN users u ON u.id = p.author_user_id
    WHERE p.id = $1 AND p.deleted_at IS NULL AND u.deleted_at IS NULL
    FOR SHARE OF p, u
"#;

pub(super) async fn lock_visible_post(
    tx: &mut Transaction<'_, Postgres>,
    post_id: i64,
) -> Result<bool, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i64>(LOCK_VISIBLE_POST)
        .bind(post_id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(id.is_some())
}

async fn count_likes(
    tx: &mut Transaction<'_, Postgres>,
    post_id: i64,
) -> Result<i64, DomainError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_post_db_error)
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("author".to_string());
    }
    DomainError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::LOCK_VISIBLE_POST;

    #[test]
    fn visibility_lock_covers_post_and_author_rows() {
        let sql = LOCK_VISIBLE_POST.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(sql.contains("p.deleted_at IS NULL AND u.deleted_at IS NULL"));
        assert!(sql.ends_with("FOR SHARE OF p, u"));
    }
}
