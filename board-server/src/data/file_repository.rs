use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::file::StoredFile;

#[derive(Debug, Clone)]
pub(crate) struct NewFile {
    pub(crate) id: String,
    pub(crate) mime_type: String,
    pub(crate) data: Vec<u8>,
}

#[async_trait]
pub(crate) trait FileRepository: Send + Sync {
    async fn save_file(&self, input: NewFile) -> Result<StoredFile, DomainError>;
    async fn get_file(&self, id: &str) -> Result<Option<StoredFile>, DomainError>;
}
