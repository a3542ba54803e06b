use std::sync::Arc;

use tracing::info;

use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

#[derive(Debug, Clone)]
pub(crate) struct ListPostsResult {
    pub(crate) posts: Vec<Post>,
    pub(crate) offset: u32,
    pub(crate) limit: u32,
    pub(crate) total: i64,
}

pub(crate) struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub(crate) fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let post = self
            .repo
            .create_post(NewPost {
                title: req.title,
                content: req.content,
                file_url: req.file_url,
                author_id,
            })
            .await?;

        info!(post_id = post.id, author_id, "post created");
        Ok(post)
    }

    /// Counts a view and returns the post with the new hit count.
    pub(crate) async fn view_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .record_view(id)
            .await?
            .ok_or_else(|| post_not_found(id))
    }

    pub(crate) async fn update_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
        req: UpdatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;
        self.ensure_author(actor_user_id, post_id).await?;

        let patch = PostPatch {
            title: req.title,
            content: req.content,
            file_url: req.file_url,
        };
        self.repo
            .update_post_owned(post_id, actor_user_id, patch)
            .await?
            .ok_or_else(|| post_not_found(post_id))
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<(), DomainError> {
        self.ensure_author(actor_user_id, post_id).await?;

        if !self.repo.soft_delete_post(post_id).await? {
            return Err(post_not_found(post_id));
        }
        info!(post_id, "post deleted");
        Ok(())
    }

    pub(crate) async fn list_posts(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<ListPostsResult, DomainError> {
        let posts = self.repo.list_posts(Pagination { offset, limit }).await?;
        let total = self.repo.total_posts().await?;

        Ok(ListPostsResult {
            posts,
            offset,
            limit,
            total,
        })
    }

    pub(crate) async fn like_post(&self, user_id: i64, post_id: i64) -> Result<i64, DomainError> {
        self.repo
            .add_like(post_id, user_id)
            .await?
            .ok_or_else(|| post_not_found(post_id))
    }

    pub(crate) async fn unlike_post(&self, user_id: i64, post_id: i64) -> Result<i64, DomainError> {
        self.repo
            .remove_like(post_id, user_id)
            .await?
            .ok_or_else(|| post_not_found(post_id))
    }

    async fn ensure_author(&self, actor_user_id: i64, post_id: i64) -> Result<(), DomainError> {
        let post = self
            .repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| post_not_found(post_id))?;

        if !post.is_authored_by(actor_user_id) {
            return Err(DomainError::Forbidden);
        }
        Ok(())
    }
}

fn post_not_found(id: i64) -> DomainError {
    DomainError::NotFound(format!("post id: {id}"))
}
