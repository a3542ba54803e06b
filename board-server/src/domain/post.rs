use chrono::{DateTime, Utc};

use super::error::{DomainError, ValidationError};

pub(crate) const TITLE_MAX_CHARS: usize = 26;

#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_id: i64,
    pub(crate) file_url: Option<String>,
    pub(crate) hits: i64,
    pub(crate) like_count: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Post {
    pub(crate) fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) file_url: Option<String>,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            file_url: normalize_file_url(self.file_url),
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) file_url: Option<String>,
}

impl UpdatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_title(&self.title)?,
            content: normalize_content(&self.content)?,
            file_url: normalize_file_url(self.file_url),
        })
    }
}

fn normalize_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(title.to_string())
}

fn normalize_content(content: &str) -> Result<String, ValidationError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::ContentRequired);
    }
    Ok(content.to_string())
}

fn normalize_file_url(file_url: Option<String>) -> Option<String> {
    file_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{CreatePostRequest, DomainError, UpdatePostRequest};
    use crate::domain::error::ValidationError;

    fn create(title: &str, content: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            content: content.to_string(),
            file_url: None,
        }
    }

    fn assert_validation(err: DomainError, expected: ValidationError) {
        match err {
            DomainError::Validation(actual) => assert_eq!(actual, expected),
            other => panic!("expected DomainError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn create_post_request_validate_rejects_empty_title() {
        let err = create("   ", "valid content")
            .validate()
            .expect_err("title must be rejected");
        assert_validation(err, ValidationError::TitleRequired);
    }

    #[test]
    fn title_limit_counts_characters_not_bytes() {
        let exactly = "가".repeat(26);
        assert!(create(&exactly, "body").validate().is_ok());

        let too_long = "a".repeat(27);
        let err = create(&too_long, "body").validate().expect_err("must fail");
        assert_validation(err, ValidationError::TitleTooLong);
    }

    #[test]
    fn update_post_request_validate_rejects_empty_content() {
        let req = UpdatePostRequest {
            title: "valid title".to_string(),
            content: "   ".to_string(),
            file_url: Some("/public/files/abc".to_string()),
        };

        let err = req.validate().expect_err("content must be rejected");
        assert_validation(err, ValidationError::ContentRequired);
    }

    #[test]
    fn create_post_request_validate_normalizes_fields() {
        let req = CreatePostRequest {
            title: "  title  ".to_string(),
            content: "  content  ".to_string(),
            file_url: Some("  ".to_string()),
        };

        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "title");
        assert_eq!(validated.content, "content");
        assert!(validated.file_url.is_none());
    }
}
