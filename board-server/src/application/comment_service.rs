use std::sync::Arc;

use tracing::info;

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::PostRepository;
use crate::domain::comment::{Comment, CommentRequest};
use crate::domain::error::DomainError;

pub(crate) struct CommentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub(crate) fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub(crate) async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        if self.posts.get_post(post_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        self.comments.list_comments(post_id).await
    }

    pub(crate) async fn create_comment(
        &self,
        author_id: i64,
        post_id: i64,
        req: CommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;

        let comment = self
            .comments
            .create_comment(NewComment {
                post_id,
                author_id,
                content: req.content,
            })
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))?;

        info!(comment_id = comment.id, post_id, author_id, "comment created");
        Ok(comment)
    }

    pub(crate) async fn update_comment(
        &self,
        actor_user_id: i64,
        post_id: i64,
        comment_id: i64,
        req: CommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;
        self.ensure_author(actor_user_id, post_id, comment_id)
            .await?;

        self.comments
            .update_comment_owned(comment_id, actor_user_id, req.content)
            .await?
            .ok_or_else(|| comment_not_found(comment_id))
    }

    pub(crate) async fn delete_comment(
        &self,
        actor_user_id: i64,
        post_id: i64,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        self.ensure_author(actor_user_id, post_id, comment_id)
            .await?;

        if !self.comments.soft_delete_comment(comment_id).await? {
            return Err(comment_not_found(comment_id));
        }
        info!(comment_id, post_id, "comment deleted");
        Ok(())
    }

    /// A comment addressed under the wrong post is reported as missing.
    async fn ensure_author(
        &self,
        actor_user_id: i64,
        post_id: i64,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        let comment = self
            .comments
            .get_comment(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| comment_not_found(comment_id))?;

        if !comment.is_authored_by(actor_user_id) {
            return Err(DomainError::Forbidden);
        }
        Ok(())
    }
}

fn comment_not_found(id: i64) -> DomainError {
    DomainError::NotFound(format!("comment id: {id}"))
}
