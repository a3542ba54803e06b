use async_trait::async_trait;
use chrono::Utc;

use super::{CommentRecord, MemoryStore};
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create_comment(&self, input: NewComment) -> Result<Option<Comment>, DomainError> {
        let mut state = self.lock()?;
        if state.visible_post(input.post_id).is_none() {
            return Ok(None);
        }

        state.last_comment_id += 1;
        let now = Utc::now();
        let comment = Comment {
            id: state.last_comment_id,
            post_id: input.post_id,
            author_id: input.author_id,
            content: input.content,
            created_at: now,
            updated_at: now,
        };
        state.comments.insert(
            comment.id,
            CommentRecord {
                comment: comment.clone(),
                deleted_at: None,
            },
        );
        Ok(Some(comment))
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .comments
            .get(&id)
            .filter(|r| state.is_comment_visible(r))
            .map(|r| r.comment.clone()))
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let state = self.lock()?;
        // Ids grow with insertion time, so map order is already oldest first.
        Ok(state
            .comments
            .values()
            .filter(|r| r.comment.post_id == post_id && state.is_comment_visible(r))
            .map(|r| r.comment.clone())
            .collect())
    }

    async fn update_comment_owned(
        &self,
        comment_id: i64,
        owner_id: i64,
        content: String,
    ) -> Result<Option<Comment>, DomainError> {
        let mut state = self.lock()?;
        let Some(record) = state
            .comments
            .get_mut(&comment_id)
            .filter(|r| r.deleted_at.is_none() && r.comment.author_id == owner_id)
        else {
            return Ok(None);
        };

        record.comment.content = content;
        record.comment.updated_at = Utc::now();
        Ok(Some(record.comment.clone()))
    }

    async fn soft_delete_comment(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        let Some(record) = state
            .comments
            .get_mut(&id)
            .filter(|r| r.deleted_at.is_none())
        else {
            return Ok(false);
        };
        record.deleted_at = Some(Utc::now());
        Ok(true)
    }
}
