use std::sync::Arc;

use tracing::info;

use crate::data::user_repository::{UserPatch, UserRepository};
use crate::domain::error::{DomainError, UniqueField, ValidationError};
use crate::domain::user::{ChangePasswordRequest, UpdateProfileRequest, User};
use crate::infrastructure::password::PasswordService;

pub(crate) struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: PasswordService,
}

impl UserService {
    pub(crate) fn new(users: Arc<dyn UserRepository>, passwords: PasswordService) -> Self {
        Self { users, passwords }
    }

    pub(crate) async fn get_user(&self, user_id: i64) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {user_id}")))
    }

    pub(crate) async fn update_profile(
        &self,
        user_id: i64,
        req: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let req = req.validate()?;

        if let Some(holder) = self.users.find_by_nickname(&req.nickname).await?
            && holder.id != user_id
        {
            return Err(DomainError::AlreadyExists(UniqueField::Nickname));
        }

        let patch = UserPatch {
            nickname: req.nickname,
            profile_image_url: req.profile_image_url,
        };
        let user = self
            .users
            .update_profile(user_id, patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {user_id}")))?;

        info!(user_id, "profile updated");
        Ok(user)
    }

    pub(crate) async fn change_password(
        &self,
        user_id: i64,
        req: ChangePasswordRequest,
    ) -> Result<(), DomainError> {
        let req = req.validate()?;
        let password_hash = self.passwords.hash_password(&req.password)?;

        if !self.users.update_password(user_id, password_hash).await? {
            return Err(DomainError::NotFound(format!("user id: {user_id}")));
        }

        info!(user_id, "password changed");
        Ok(())
    }

    pub(crate) async fn update_profile_image(
        &self,
        user_id: i64,
        profile_image_url: Option<String>,
    ) -> Result<User, DomainError> {
        let url = profile_image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(ValidationError::InvalidField {
                field: "profileImageUrl",
                message: "must not be blank",
            })?;

        self.users
            .update_profile_image(user_id, url)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {user_id}")))
    }

    pub(crate) async fn delete_account(&self, user_id: i64) -> Result<(), DomainError> {
        if !self.users.soft_delete_user(user_id).await? {
            return Err(DomainError::NotFound(format!("user id: {user_id}")));
        }
        info!(user_id, "account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::UserService;
    use crate::data::Repositories;
    use crate::data::user_repository::NewUser;
    use crate::domain::error::{DomainError, UniqueField, ValidationError};
    use crate::domain::user::{ChangePasswordRequest, UpdateProfileRequest, User};
    use crate::infrastructure::password::PasswordService;

    async fn seed_user(repos: &Repositories, email: &str, nickname: &str) -> User {
        repos
            .users
            .create_user(NewUser {
                email: email.to_string(),
                nickname: nickname.to_string(),
                password_hash: "hash".to_string(),
                profile_image_url: None,
            })
            .await
            .expect("seed user must be created")
    }

    fn service(repos: &Repositories) -> UserService {
        UserService::new(repos.users.clone(), PasswordService::new())
    }

    #[tokio::test]
    async fn update_profile_allows_own_nickname_and_rejects_taken_one() {
        let repos = Repositories::in_memory();
        let service = service(&repos);
        let alice = seed_user(&repos, "alice@example.com", "alice").await;
        seed_user(&repos, "bob@example.com", "bob").await;

        let same = service
            .update_profile(
                alice.id,
                UpdateProfileRequest {
                    nickname: " alice ".to_string(),
                    profile_image_url: Some("/public/files/a".to_string()),
                },
            )
            .await
            .expect("keeping own nickname must succeed");
        assert_eq!(same.nickname, "alice");
        assert_eq!(same.profile_image_url.as_deref(), Some("/public/files/a"));

        let err = service
            .update_profile(
                alice.id,
                UpdateProfileRequest {
                    nickname: "bob".to_string(),
                    profile_image_url: None,
                },
            )
            .await
            .expect_err("taken nickname must fail");
        assert!(matches!(
            err,
            DomainError::AlreadyExists(UniqueField::Nickname)
        ));
    }

    #[tokio::test]
    async fn change_password_replaces_hash() {
        let repos = Repositories::in_memory();
        let service = service(&repos);
        let alice = seed_user(&repos, "alice@example.com", "alice").await;

        service
            .change_password(
                alice.id,
                ChangePasswordRequest {
                    password: "Newpass1!".to_string(),
                    password_confirm: "Newpass1!".to_string(),
                },
            )
            .await
            .expect("change must succeed");

        let creds = repos
            .users
            .find_by_email("alice@example.com")
            .await
            .expect("lookup must succeed")
            .expect("user must exist");
        PasswordService::new()
            .verify_password("Newpass1!", &creds.password_hash)
            .expect("new password must verify");
    }

    #[tokio::test]
    async fn blank_profile_image_is_bad_request() {
        let repos = Repositories::in_memory();
        let service = service(&repos);
        let alice = seed_user(&repos, "alice@example.com", "alice").await;

        let err = service
            .update_profile_image(alice.id, Some("   ".to_string()))
            .await
            .expect_err("blank url must fail");
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::InvalidField { .. })
        ));
        assert_eq!(err.code(), "BAD_REQUEST");

        let updated = service
            .update_profile_image(alice.id, Some("/public/files/p".to_string()))
            .await
            .expect("update must succeed");
        assert_eq!(updated.profile_image_url.as_deref(), Some("/public/files/p"));
    }

    #[tokio::test]
    async fn deleted_account_is_no_longer_found() {
        let repos = Repositories::in_memory();
        let service = service(&repos);
        let alice = seed_user(&repos, "alice@example.com", "alice").await;

        service
            .delete_account(alice.id)
            .await
            .expect("delete must succeed");

        let err = service
            .get_user(alice.id)
            .await
            .expect_err("deleted user must be hidden");
        assert!(matches!(err, DomainError::NotFound(_)));

        let err = service
            .delete_account(alice.id)
            .await
            .expect_err("second delete must fail");
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
