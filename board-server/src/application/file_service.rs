use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::data::file_repository::{FileRepository, NewFile};
use crate::domain::error::DomainError;
use crate::domain::file::{DEFAULT_MIME_TYPE, StoredFile, UploadRequest};

pub(crate) struct FileService {
    repo: Arc<dyn FileRepository>,
}

impl FileService {
    pub(crate) fn new(repo: Arc<dyn FileRepository>) -> Self {
        Self { repo }
    }

    pub(crate) async fn upload(&self, req: UploadRequest) -> Result<StoredFile, DomainError> {
        let req = req.validate()?;

        let file = self
            .repo
            .save_file(NewFile {
                id: Uuid::new_v4().to_string(),
                mime_type: req
                    .mime_type
                    .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
                data: req.data,
            })
            .await?;

        info!(
            file_id = %file.id,
            mime_type = %file.mime_type,
            bytes = file.data.len(),
            "file stored"
        );
        Ok(file)
    }

    pub(crate) async fn get_file(&self, file_id: &str) -> Result<StoredFile, DomainError> {
        self.repo
            .get_file(file_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("file id: {file_id}")))
    }
}
