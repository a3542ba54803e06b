use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("request timed out")]
    RequestTimeout,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

/// Body of every failed response.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorBody {
    pub(crate) code: String,
    pub(crate) message: String,
}

impl AppError {
    fn parts(self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Domain(err) => {
                let status = match &err {
                    DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                    DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
                    DomainError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                    DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                    DomainError::Forbidden => StatusCode::FORBIDDEN,
                    DomainError::Unexpected(detail) => {
                        error!(%detail, "request failed with unexpected error");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let message = match &err {
                    DomainError::Unexpected(_) => "internal error".to_string(),
                    _ => err.to_string(),
                };
                (status, err.code(), message)
            }
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", err.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", "not found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "unauthorized".to_string(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "request body is too large".to_string(),
            ),
            AppError::RequestTimeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "request timed out".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = ErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Path segments are only ever ids, so an unparsable one names nothing.
impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        AppError::NotFound
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::AppError;
    use crate::domain::error::{DomainError, UniqueField, ValidationError};

    #[test]
    fn domain_errors_map_to_status_and_code() {
        let cases = [
            (
                DomainError::Validation(ValidationError::TitleTooLong),
                StatusCode::BAD_REQUEST,
                "TITLE_TOO_LONG",
            ),
            (
                DomainError::AlreadyExists(UniqueField::Nickname),
                StatusCode::CONFLICT,
                "NICKNAME_ALREADY_EXISTS",
            ),
            (
                DomainError::InvalidCredentials,
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
            ),
            (DomainError::Forbidden, StatusCode::FORBIDDEN, "FORBIDDEN"),
            (
                DomainError::NotFound("post id: 1".to_string()),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
        ];

        for (err, status, code) in cases {
            let (got_status, got_code, _) = AppError::from(err).parts();
            assert_eq!(got_status, status);
            assert_eq!(got_code, code);
        }
    }

    #[test]
    fn unexpected_error_hides_details() {
        let (status, code, message) =
            AppError::from(DomainError::Unexpected("connection refused".to_string())).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
        assert_eq!(message, "internal error");
    }
}
