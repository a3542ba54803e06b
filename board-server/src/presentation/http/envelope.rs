use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope: `{"code": ..., "data": ...}`.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ApiResponse<T> {
    pub(crate) code: String,
    pub(crate) data: T,
}

pub(crate) type ApiReply<T> = (StatusCode, Json<ApiResponse<T>>);

pub(crate) fn ok<T>(code: &str, data: T) -> ApiReply<T> {
    reply(StatusCode::OK, code, data)
}

pub(crate) fn created<T>(code: &str, data: T) -> ApiReply<T> {
    reply(StatusCode::CREATED, code, data)
}

fn reply<T>(status: StatusCode, code: &str, data: T) -> ApiReply<T> {
    (
        status,
        Json(ApiResponse {
            code: code.to_string(),
            data,
        }),
    )
}
