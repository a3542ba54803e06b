use chrono::{DateTime, Utc};
use validator::ValidateEmail;

use super::error::{DomainError, ValidationError};

pub(crate) const NICKNAME_MAX_CHARS: usize = 10;
const PASSWORD_MIN_CHARS: usize = 8;
const PASSWORD_MAX_CHARS: usize = 20;

#[derive(Debug, Clone)]
pub(crate) struct SignupRequest {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) password_confirm: Option<String>,
    pub(crate) nickname: String,
    pub(crate) profile_image_url: Option<String>,
}

impl SignupRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = normalize_email(&self.email)?;
        validate_password(&self.password)?;
        if let Some(confirm) = &self.password_confirm
            && confirm != &self.password
        {
            return Err(ValidationError::PasswordConfirmMismatch.into());
        }
        let nickname = normalize_nickname(&self.nickname)?;

        Ok(Self {
            email,
            password: self.password,
            password_confirm: None,
            nickname,
            profile_image_url: normalize_optional_url(self.profile_image_url),
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::EmailRequired.into());
        }
        if self.password.is_empty() {
            return Err(ValidationError::PasswordRequired.into());
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct UpdateProfileRequest {
    pub(crate) nickname: String,
    pub(crate) profile_image_url: Option<String>,
}

impl UpdateProfileRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            nickname: normalize_nickname(&self.nickname)?,
            profile_image_url: normalize_optional_url(self.profile_image_url),
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ChangePasswordRequest {
    pub(crate) password: String,
    pub(crate) password_confirm: String,
}

impl ChangePasswordRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        if self.password != self.password_confirm {
            return Err(ValidationError::PasswordConfirmMismatch.into());
        }
        validate_password(&self.password)?;
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) email: String,
    pub(crate) nickname: String,
    pub(crate) profile_image_url: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        email: impl Into<String>,
        nickname: impl Into<String>,
        profile_image_url: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(ValidationError::InvalidField {
                field: "id",
                message: "must be > 0",
            }
            .into());
        }

        Ok(Self {
            id,
            email: email.into(),
            nickname: nickname.into(),
            profile_image_url,
            created_at,
            updated_at,
        })
    }
}

pub(crate) fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    // `validate_email` accepts bare hosts like `a@localhost`; a dotted domain is required here.
    let dotted_domain = email
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.split_once('.'))
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
    if !dotted_domain || !email.validate_email() {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

pub(crate) fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }

    let len = password.chars().count();
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && c != '_' && !c.is_whitespace());

    if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&len)
        || !(has_lower && has_upper && has_digit && has_symbol)
    {
        return Err(ValidationError::InvalidPassword);
    }
    Ok(())
}

pub(crate) fn normalize_nickname(nickname: &str) -> Result<String, ValidationError> {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(ValidationError::NicknameRequired);
    }
    if nickname.chars().count() > NICKNAME_MAX_CHARS {
        return Err(ValidationError::InvalidNickname);
    }
    Ok(nickname.to_string())
}

fn normalize_optional_url(url: Option<String>) -> Option<String> {
    url.map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}
