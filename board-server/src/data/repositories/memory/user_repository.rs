use async_trait::async_trait;
use chrono::Utc;

use super::{MemoryState, MemoryStore, UserRecord};
use crate::data::user_repository::{NewUser, UserCredentials, UserPatch, UserRepository};
use crate::domain::error::{DomainError, UniqueField};
use crate::domain::user::User;

impl MemoryState {
    fn active_user_by(&self, matches: impl Fn(&User) -> bool) -> Option<&UserRecord> {
        self.users
            .values()
            .find(|r| r.deleted_at.is_none() && matches(&r.user))
    }

    fn ensure_unique(
        &self,
        email: Option<&str>,
        nickname: &str,
        except_id: Option<i64>,
    ) -> Result<(), DomainError> {
        let other = |u: &User| Some(u.id) != except_id;
        if let Some(email) = email
            && self.active_user_by(|u| other(u) && u.email == email).is_some()
        {
            return Err(DomainError::AlreadyExists(UniqueField::Email));
        }
        if self
            .active_user_by(|u| other(u) && u.nickname == nickname)
            .is_some()
        {
            return Err(DomainError::AlreadyExists(UniqueField::Nickname));
        }
        Ok(())
    }

    fn active_user_mut(&mut self, id: i64) -> Option<&mut UserRecord> {
        self.users.get_mut(&id).filter(|r| r.deleted_at.is_none())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut state = self.lock()?;
        state.ensure_unique(Some(&input.email), &input.nickname, None)?;

        state.last_user_id += 1;
        let now = Utc::now();
        let user = User::new(
            state.last_user_id,
            input.email,
            input.nickname,
            input.profile_image_url,
            now,
            now,
        )?;
        state.users.insert(
            user.id,
            UserRecord {
                user: user.clone(),
                password_hash: input.password_hash,
                deleted_at: None,
            },
        );
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let state = self.lock()?;
        Ok(state.active_user(id).map(|r| r.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .active_user_by(|u| u.email == email)
            .map(|r| UserCredentials {
                user: r.user.clone(),
                password_hash: r.password_hash.clone(),
            }))
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .active_user_by(|u| u.nickname == nickname)
            .map(|r| r.user.clone()))
    }

    async fn update_profile(&self, id: i64, patch: UserPatch) -> Result<Option<User>, DomainError> {
        let mut state = self.lock()?;
        if !state.is_user_active(id) {
            return Ok(None);
        }
        state.ensure_unique(None, &patch.nickname, Some(id))?;

        let Some(record) = state.active_user_mut(id) else {
            return Ok(None);
        };
        record.user.nickname = patch.nickname;
        if let Some(url) = patch.profile_image_url {
            record.user.profile_image_url = Some(url);
        }
        record.user.updated_at = Utc::now();
        Ok(Some(record.user.clone()))
    }

    async fn update_profile_image(
        &self,
        id: i64,
        profile_image_url: String,
    ) -> Result<Option<User>, DomainError> {
        let mut state = self.lock()?;
        let Some(record) = state.active_user_mut(id) else {
            return Ok(None);
        };
        record.user.profile_image_url = Some(profile_image_url);
        record.user.updated_at = Utc::now();
        Ok(Some(record.user.clone()))
    }

    async fn update_password(&self, id: i64, password_hash: String) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        let Some(record) = state.active_user_mut(id) else {
            return Ok(false);
        };
        record.password_hash = password_hash;
        record.user.updated_at = Utc::now();
        Ok(true)
    }

    async fn soft_delete_user(&self, id: i64) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        let now = Utc::now();
        let Some(record) = state.active_user_mut(id) else {
            return Ok(false);
        };
        record.deleted_at = Some(now);
        record.user.updated_at = now;

        state.sessions.retain(|_, session| session.user_id != id);

        let mut authored_posts = Vec::new();
        for post in state.posts.values_mut() {
            post.likes.remove(&id);
            if post.author_id == id {
                authored_posts.push(post.id);
                if post.deleted_at.is_none() {
                    post.deleted_at = Some(now);
                }
            }
        }

        state.soft_delete_comments_where(now, |c| {
            c.author_id == id || authored_posts.contains(&c.post_id)
        });
        Ok(true)
    }
}
