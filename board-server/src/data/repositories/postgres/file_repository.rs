use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::file_repository::{FileRepository, NewFile};
use crate::domain::error::DomainError;
use crate::domain::file::StoredFile;

#[derive(Debug, Clone)]
pub(crate) struct PostgresFileRepository {
    pool: PgPool,
}

impl PostgresFileRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct FileRow {
    id: String,
    mime_type: String,
    data: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl From<FileRow> for StoredFile {
    fn from(row: FileRow) -> Self {
        Self {
            id: row.id,
            mime_type: row.mime_type,
            data: row.data,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FileRepository for PostgresFileRepository {
    async fn save_file(&self, input: NewFile) -> Result<StoredFile, DomainError> {
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            INSERT INTO files (id, mime_type, data)
            VALUES ($1, $2, $3)
            RETURNING created_at
            "#,
        )
        .bind(&input.id)
        .bind(&input.mime_type)
        .bind(&input.data)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(StoredFile {
            id: input.id,
            mime_type: input.mime_type,
            data: input.data,
            created_at,
        })
    }

    async fn get_file(&self, id: &str) -> Result<Option<StoredFile>, DomainError> {
        let row = sqlx::query_as::<_, FileRow>(
            r#"
            SELECT id, mime_type, data, created_at
            FROM files
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(row.map(StoredFile::from))
    }
}
