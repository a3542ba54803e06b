use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;

use super::{MemoryStore, PostRecord};
use crate::data::post_repository::{NewPost, Pagination, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut state = self.lock()?;
        if !state.is_user_active(input.author_id) {
            return Err(DomainError::NotFound("author".to_string()));
        }

        state.last_post_id += 1;
        let now = Utc::now();
        let record = PostRecord {
            id: state.last_post_id,
            title: input.title,
            content: input.content,
            author_id: input.author_id,
            file_url: input.file_url,
            hits: 0,
            likes: BTreeSet::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let post = record.snapshot();
        state.posts.insert(record.id, record);
        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let state = self.lock()?;
        Ok(state.visible_post(id).map(PostRecord::snapshot))
    }

    async fn record_view(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let mut state = self.lock()?;
        if state.visible_post(id).is_none() {
            return Ok(None);
        }
        Ok(state.posts.get_mut(&id).map(|record| {
            record.hits += 1;
            record.snapshot()
        }))
    }

    async fn update_post_owned(
        &self,
        post_id: i64,
        owner_id: i64,
        patch: PostPatch,
    ) -> Result<Option<Post>, DomainError> {
        let mut state = self.lock()?;
        let Some(record) = state
            .posts
            .get_mut(&post_id)
            .filter(|r| r.deleted_at.is_none() && r.author_id == owner_id)
        else {
            return Ok(None);
        };

        record.title = patch.title;
        record.content = patch.content;
        record.file_url = patch.file_url;
        record.updated_at = Utc::now();
        Ok(Some(record.snapshot()))
    }

    async fn soft_delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        let now = Utc::now();
        let Some(record) = state
            .posts
            .get_mut(&id)
            .filter(|r| r.deleted_at.is_none())
        else {
            return Ok(false);
        };
        record.deleted_at = Some(now);

        state.soft_delete_comments_where(now, |c| c.post_id == id);
        Ok(true)
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError> {
        let state = self.lock()?;
        let mut visible: Vec<&PostRecord> = state
            .posts
            .values()
            .filter(|r| state.is_post_visible(r))
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(visible
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .map(PostRecord::snapshot)
            .collect())
    }

    async fn total_posts(&self) -> Result<i64, DomainError> {
        let state = self.lock()?;
        let total = state
            .posts
            .values()
            .filter(|r| state.is_post_visible(r))
            .count();
        Ok(total as i64)
    }

    async fn add_like(&self, post_id: i64, user_id: i64) -> Result<Option<i64>, DomainError> {
        let mut state = self.lock()?;
        if state.visible_post(post_id).is_none() {
            return Ok(None);
        }
        Ok(state.posts.get_mut(&post_id).map(|record| {
            record.likes.insert(user_id);
            record.likes.len() as i64
        }))
    }

    async fn remove_like(&self, post_id: i64, user_id: i64) -> Result<Option<i64>, DomainError> {
        let mut state = self.lock()?;
        if state.visible_post(post_id).is_none() {
            return Ok(None);
        }
        Ok(state.posts.get_mut(&post_id).map(|record| {
            record.likes.remove(&user_id);
            record.likes.len() as i64
        }))
    }
}
