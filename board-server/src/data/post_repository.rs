use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) file_url: Option<String>,
    pub(crate) author_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) file_url: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Pagination {
    pub(crate) offset: u32,
    pub(crate) limit: u32,
}

/// A post is visible while neither it nor its author is soft-deleted; every
/// method below treats invisible posts as missing.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    /// Increments the hit counter and returns the post as seen after the view.
    async fn record_view(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError>;
    /// Soft-deletes the post together with its comments.
    async fn soft_delete_post(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError>;
    async fn total_posts(&self) -> Result<i64, DomainError>;
    /// Returns the like count after the call, `None` when the post is missing.
    async fn add_like(&self, post_id: i64, user_id: i64) -> Result<Option<i64>, DomainError>;
    async fn remove_like(&self, post_id: i64, user_id: i64) -> Result<Option<i64>, DomainError>;
}
