use chrono::{DateTime, Utc};

use super::error::{DomainError, ValidationError};

#[derive(Debug, Clone)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) post_id: i64,
    pub(crate) author_id: i64,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Comment {
    pub(crate) fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

/// Body of both create and update calls.
#[derive(Debug, Clone)]
pub(crate) struct CommentRequest {
    pub(crate) content: String,
}

impl CommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(ValidationError::CommentRequired.into());
        }
        Ok(Self {
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::CommentRequest;
    use crate::domain::error::{DomainError, ValidationError};

    #[test]
    fn blank_comment_is_rejected() {
        let err = CommentRequest {
            content: " \n ".to_string(),
        }
        .validate()
        .expect_err("must fail");
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::CommentRequired)
        ));
    }

    #[test]
    fn comment_is_trimmed() {
        let req = CommentRequest {
            content: "  nice post  ".to_string(),
        }
        .validate()
        .expect("must validate");
        assert_eq!(req.content, "nice post");
    }
}
