use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) email: String,
    pub(crate) nickname: String,
    pub(crate) password_hash: String,
    pub(crate) profile_image_url: Option<String>,
}

/// `profile_image_url: None` keeps the stored value.
#[derive(Debug, Clone)]
pub(crate) struct UserPatch {
    pub(crate) nickname: String,
    pub(crate) profile_image_url: Option<String>,
}

/// Lookups only ever see active (not soft-deleted) users.
#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, DomainError>;
    async fn update_profile(&self, id: i64, patch: UserPatch) -> Result<Option<User>, DomainError>;
    async fn update_profile_image(
        &self,
        id: i64,
        profile_image_url: String,
    ) -> Result<Option<User>, DomainError>;
    async fn update_password(&self, id: i64, password_hash: String) -> Result<bool, DomainError>;
    /// Soft-deletes the user, their posts and comments (plus comments under
    /// their posts), and hard-deletes their sessions and likes.
    async fn soft_delete_user(&self, id: i64) -> Result<bool, DomainError>;
}
