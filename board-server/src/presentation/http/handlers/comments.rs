use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::comment::{Comment, CommentRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::envelope::{ApiReply, ApiResponse, created, ok};
use crate::presentation::http::extract::{ApiJson, ApiPath};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CommentBodyDto {
    pub(crate) content: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentDto {
    pub(crate) comment_id: i64,
    pub(crate) post_id: i64,
    pub(crate) author_user_id: i64,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentListDto {
    pub(crate) items: Vec<CommentDto>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentIdDto {
    pub(crate) comment_id: i64,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.id,
            post_id: comment.post_id,
            author_user_id: comment.author_id,
            content: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<CommentBodyDto> for CommentRequest {
    fn from(dto: CommentBodyDto) -> Self {
        Self {
            content: dto.content.unwrap_or_default(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/posts/{postId}/comments",
    tag = "comments",
    params(
        ("postId" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "COMMENTS_RETRIEVED, oldest first", body = ApiResponse<CommentListDto>),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub(crate) async fn list_comments(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<i64>,
) -> AppResult<ApiReply<CommentListDto>> {
    let comments = state.comment_service.list_comments(post_id).await?;

    Ok(ok(
        "COMMENTS_RETRIEVED",
        CommentListDto {
            items: comments.into_iter().map(CommentDto::from).collect(),
        },
    ))
}

#[utoipa::path(
    post,
    path = "/v1/posts/{postId}/comments",
    tag = "comments",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("postId" = i64, Path, description = "Post id")
    ),
    request_body = CommentBodyDto,
    responses(
        (status = 201, description = "COMMENT_CREATED", body = ApiResponse<CommentIdDto>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(post_id): ApiPath<i64>,
    ApiJson(dto): ApiJson<CommentBodyDto>,
) -> AppResult<ApiReply<CommentIdDto>> {
    let comment = state
        .comment_service
        .create_comment(auth.user_id(), post_id, dto.into())
        .await?;

    Ok(created(
        "COMMENT_CREATED",
        CommentIdDto {
            comment_id: comment.id,
        },
    ))
}

#[utoipa::path(
    patch,
    path = "/v1/posts/{postId}/comments/{commentId}",
    tag = "comments",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("postId" = i64, Path, description = "Post id"),
        ("commentId" = i64, Path, description = "Comment id")
    ),
    request_body = CommentBodyDto,
    responses(
        (status = 200, description = "COMMENT_UPDATED", body = ApiResponse<CommentDto>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden", body = ErrorBody),
        (status = 404, description = "Comment not found", body = ErrorBody)
    )
)]
pub(crate) async fn update_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath((post_id, comment_id)): ApiPath<(i64, i64)>,
    ApiJson(dto): ApiJson<CommentBodyDto>,
) -> AppResult<ApiReply<CommentDto>> {
    let comment = state
        .comment_service
        .update_comment(auth.user_id(), post_id, comment_id, dto.into())
        .await?;
    Ok(ok("COMMENT_UPDATED", CommentDto::from(comment)))
}

#[utoipa::path(
    delete,
    path = "/v1/posts/{postId}/comments/{commentId}",
    tag = "comments",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("postId" = i64, Path, description = "Post id"),
        ("commentId" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "COMMENT_DELETED, data is null"),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden", body = ErrorBody),
        (status = 404, description = "Comment not found", body = ErrorBody)
    )
)]
pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath((post_id, comment_id)): ApiPath<(i64, i64)>,
) -> AppResult<ApiReply<()>> {
    state
        .comment_service
        .delete_comment(auth.user_id(), post_id, comment_id)
        .await?;
    Ok(ok("COMMENT_DELETED", ()))
}
