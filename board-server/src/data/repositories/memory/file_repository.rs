use async_trait::async_trait;
use chrono::Utc;

use super::MemoryStore;
use crate::data::file_repository::{FileRepository, NewFile};
use crate::domain::error::DomainError;
use crate::domain::file::StoredFile;

#[async_trait]
impl FileRepository for MemoryStore {
    async fn save_file(&self, input: NewFile) -> Result<StoredFile, DomainError> {
        let mut state = self.lock()?;
        let file = StoredFile {
            id: input.id,
            mime_type: input.mime_type,
            data: input.data,
            created_at: Utc::now(),
        };
        state.files.insert(file.id.clone(), file.clone());
        Ok(file)
    }

    async fn get_file(&self, id: &str) -> Result<Option<StoredFile>, DomainError> {
        let state = self.lock()?;
        Ok(state.files.get(id).cloned())
    }
}
