//! In-process storage backend.
//!
//! Every repository trait is implemented on [`MemoryStore`], and every call
//! holds the single state lock for its whole check-and-mutate step, so the
//! uniqueness and ownership rules hold under concurrent requests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::file::StoredFile;
use crate::domain::post::Post;
use crate::domain::session::Session;
use crate::domain::user::User;

mod comment_repository;
mod file_repository;
mod post_repository;
mod session_repository;
mod user_repository;

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::Unexpected("memory store lock poisoned".to_string()))
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<i64, UserRecord>,
    last_user_id: i64,
    sessions: HashMap<String, Session>,
    posts: BTreeMap<i64, PostRecord>,
    last_post_id: i64,
    comments: BTreeMap<i64, CommentRecord>,
    last_comment_id: i64,
    files: HashMap<String, StoredFile>,
}

#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    password_hash: String,
    deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct PostRecord {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    file_url: Option<String>,
    hits: i64,
    likes: BTreeSet<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl PostRecord {
    fn snapshot(&self) -> Post {
        Post {
            id: self.id,
            title: self.title.clone(),
            content: self.content.clone(),
            author_id: self.author_id,
            file_url: self.file_url.clone(),
            hits: self.hits,
            like_count: self.likes.len() as i64,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
struct CommentRecord {
    comment: Comment,
    deleted_at: Option<DateTime<Utc>>,
}

impl MemoryState {
    fn active_user(&self, id: i64) -> Option<&UserRecord> {
        self.users.get(&id).filter(|r| r.deleted_at.is_none())
    }

    fn is_user_active(&self, id: i64) -> bool {
        self.active_user(id).is_some()
    }

    fn is_post_visible(&self, record: &PostRecord) -> bool {
        record.deleted_at.is_none() && self.is_user_active(record.author_id)
    }

    fn visible_post(&self, id: i64) -> Option<&PostRecord> {
        self.posts.get(&id).filter(|r| self.is_post_visible(r))
    }

    fn is_comment_visible(&self, record: &CommentRecord) -> bool {
        record.deleted_at.is_none() && self.is_user_active(record.comment.author_id)
    }

    fn soft_delete_comments_where(
        &mut self,
        now: DateTime<Utc>,
        matches: impl Fn(&Comment) -> bool,
    ) -> usize {
        let mut affected = 0;
        for record in self.comments.values_mut() {
            if record.deleted_at.is_none() && matches(&record.comment) {
                record.deleted_at = Some(now);
                affected += 1;
            }
        }
        affected
    }
}
