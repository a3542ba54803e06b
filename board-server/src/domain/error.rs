use thiserror::Error;

/// Input rejected before touching storage. Every variant maps to a stable
/// client-facing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum ValidationError {
    #[error("email is required")]
    EmailRequired,

    #[error("password is required")]
    PasswordRequired,

    #[error("password confirmation does not match")]
    PasswordConfirmMismatch,

    #[error("email must look like name@domain.tld")]
    InvalidEmail,

    #[error("password must be 8..20 chars with upper, lower, digit and symbol")]
    InvalidPassword,

    #[error("nickname is required")]
    NicknameRequired,

    #[error("nickname must be 1..10 chars")]
    InvalidNickname,

    #[error("title is required")]
    TitleRequired,

    #[error("title must be at most 26 chars")]
    TitleTooLong,

    #[error("content is required")]
    ContentRequired,

    #[error("comment is required")]
    CommentRequired,

    #[error("file is required")]
    FileRequired,

    #[error("invalid '{field}': {message}")]
    InvalidField {
        field: &'static str,
        message: &'static str,
    },
}

impl ValidationError {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::EmailRequired => "EMAIL_REQUIRED",
            Self::PasswordRequired => "PASSWORD_REQUIRED",
            Self::PasswordConfirmMismatch => "PASSWORD_CONFIRM_MISMATCH",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::NicknameRequired => "NICKNAME_REQUIRED",
            Self::InvalidNickname => "INVALID_NICKNAME",
            Self::TitleRequired => "TITLE_REQUIRED",
            Self::TitleTooLong => "TITLE_TOO_LONG",
            Self::ContentRequired => "CONTENT_REQUIRED",
            Self::CommentRequired => "COMMENT_REQUIRED",
            Self::FileRequired => "FILE_REQUIRED",
            Self::InvalidField { .. } => "BAD_REQUEST",
        }
    }
}

/// Fields that must be unique among active users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UniqueField {
    Email,
    Nickname,
}

impl UniqueField {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Nickname => "nickname",
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("{} already exists", .0.as_str())]
    AlreadyExists(UniqueField),

    #[error("forbidden")]
    Forbidden,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

impl DomainError {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.code(),
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(UniqueField::Email) => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyExists(UniqueField::Nickname) => "NICKNAME_ALREADY_EXISTS",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidCredentials => "UNAUTHORIZED",
            Self::Unexpected(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainError, UniqueField, ValidationError};

    #[test]
    fn conflict_codes_name_the_duplicated_field() {
        assert_eq!(
            DomainError::AlreadyExists(UniqueField::Email).code(),
            "EMAIL_ALREADY_EXISTS"
        );
        assert_eq!(
            DomainError::AlreadyExists(UniqueField::Nickname).code(),
            "NICKNAME_ALREADY_EXISTS"
        );
        assert_eq!(
            DomainError::AlreadyExists(UniqueField::Nickname).to_string(),
            "nickname already exists"
        );
    }

    #[test]
    fn validation_codes_pass_through_domain_error() {
        let err = DomainError::from(ValidationError::TitleTooLong);
        assert_eq!(err.code(), "TITLE_TOO_LONG");

        let err = DomainError::from(ValidationError::InvalidField {
            field: "limit",
            message: "must be 1..100",
        });
        assert_eq!(err.code(), "BAD_REQUEST");
    }
}
