use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) post_id: i64,
    pub(crate) author_id: i64,
    pub(crate) content: String,
}

#[async_trait]
pub(crate) trait CommentRepository: Send + Sync {
    /// `None` when the target post is not visible.
    async fn create_comment(&self, input: NewComment) -> Result<Option<Comment>, DomainError>;
    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError>;
    /// Oldest first.
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
    async fn update_comment_owned(
        &self,
        comment_id: i64,
        owner_id: i64,
        content: String,
    ) -> Result<Option<Comment>, DomainError>;
    async fn soft_delete_comment(&self, id: i64) -> Result<bool, DomainError>;
}
