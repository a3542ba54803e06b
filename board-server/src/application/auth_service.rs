use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::data::session_repository::{NewSession, SessionRepository};
use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::{DomainError, UniqueField};
use crate::domain::user::{LoginRequest, SignupRequest, User, normalize_email, normalize_nickname};
use crate::infrastructure::password::PasswordService;

#[derive(Debug, Clone)]
pub(crate) struct LoginResult {
    pub(crate) user: User,
    pub(crate) session_token: String,
}

pub(crate) struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    passwords: PasswordService,
    session_ttl: TimeDelta,
}

impl AuthService {
    pub(crate) fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        passwords: PasswordService,
        session_ttl: TimeDelta,
    ) -> Self {
        Self {
            users,
            sessions,
            passwords,
            session_ttl,
        }
    }

    pub(crate) async fn signup(&self, req: SignupRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::AlreadyExists(UniqueField::Email));
        }
        if self.users.find_by_nickname(&req.nickname).await?.is_some() {
            return Err(DomainError::AlreadyExists(UniqueField::Nickname));
        }

        let password_hash = self.passwords.hash_password(&req.password)?;
        let user = self
            .users
            .create_user(NewUser {
                email: req.email,
                nickname: req.nickname,
                password_hash,
                profile_image_url: req.profile_image_url,
            })
            .await?;

        info!(user_id = user.id, "user signed up");
        Ok(user)
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<LoginResult, DomainError> {
        let req = req.validate()?;

        let Some(creds) = self.users.find_by_email(&req.email).await? else {
            return Err(self.passwords.reject_unknown_user(&req.password));
        };
        self.passwords
            .verify_password(&req.password, &creds.password_hash)?;

        let purged = self
            .sessions
            .delete_sessions_created_before(Utc::now() - self.session_ttl)
            .await?;
        if purged > 0 {
            debug!(purged, "expired sessions purged");
        }

        let session = self
            .sessions
            .create_session(NewSession {
                token: Uuid::new_v4().simple().to_string(),
                user_id: creds.user.id,
            })
            .await?;

        info!(user_id = creds.user.id, "user logged in");
        Ok(LoginResult {
            user: creds.user,
            session_token: session.token,
        })
    }

    pub(crate) async fn logout(&self, session_token: &str) -> Result<(), DomainError> {
        if self.sessions.delete_session(session_token).await? {
            info!("session closed");
        }
        Ok(())
    }

    /// Resolves a session token to its active user. Expired sessions are
    /// removed on sight.
    pub(crate) async fn authenticate(
        &self,
        session_token: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(session) = self.sessions.find_session(session_token).await? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now(), self.session_ttl) {
            warn!(user_id = session.user_id, "expired session rejected");
            self.sessions.delete_session(&session.token).await?;
            return Ok(None);
        }

        let user = self.users.find_by_id(session.user_id).await?;
        if user.is_none() {
            self.sessions.delete_session(&session.token).await?;
        }
        Ok(user)
    }

    pub(crate) async fn email_available(&self, email: &str) -> Result<bool, DomainError> {
        let email = normalize_email(email)?;
        Ok(self.users.find_by_email(&email).await?.is_none())
    }

    pub(crate) async fn nickname_available(&self, nickname: &str) -> Result<bool, DomainError> {
        let nickname = normalize_nickname(nickname)?;
        Ok(self.users.find_by_nickname(&nickname).await?.is_none())
    }
}
