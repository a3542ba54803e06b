use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::post_service::ListPostsResult;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::envelope::{ApiReply, ApiResponse, created, ok};
use crate::presentation::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Body of both create and update.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostBodyDto {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) file_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct PaginationQuery {
    #[validate(range(min = 1, max = 100))]
    pub(crate) limit: Option<u32>,
    pub(crate) offset: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) post_id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author_user_id: i64,
    pub(crate) file_url: Option<String>,
    pub(crate) hits: i64,
    pub(crate) like_count: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) items: Vec<PostDto>,
    pub(crate) offset: u32,
    pub(crate) limit: u32,
    pub(crate) total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostIdDto {
    pub(crate) post_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LikeCountDto {
    pub(crate) like_count: i64,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            post_id: post.id,
            title: post.title,
            content: post.content,
            author_user_id: post.author_id,
            file_url: post.file_url,
            hits: post.hits,
            like_count: post.like_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<ListPostsResult> for ListPostsResponseDto {
    fn from(result: ListPostsResult) -> Self {
        Self {
            items: result.posts.into_iter().map(PostDto::from).collect(),
            offset: result.offset,
            limit: result.limit,
            total: result.total,
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/posts",
    tag = "posts",
    params(
        ("limit" = Option<u32>, Query, description = "Items per page (1..=100, default 20)"),
        ("offset" = Option<u32>, Query, description = "Offset from the newest post (>= 0)")
    ),
    responses(
        (status = 200, description = "POSTS_RETRIEVED", body = ApiResponse<ListPostsResponseDto>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PaginationQuery>,
) -> AppResult<ApiReply<ListPostsResponseDto>> {
    query.validate()?;
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = query.offset.unwrap_or(0);

    let result = state.post_service.list_posts(offset, limit).await?;
    Ok(ok("POSTS_RETRIEVED", ListPostsResponseDto::from(result)))
}

#[utoipa::path(
    get,
    path = "/v1/posts/{postId}",
    tag = "posts",
    params(
        ("postId" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "POST_RETRIEVED, counts one view", body = ApiResponse<PostDto>),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<i64>,
) -> AppResult<ApiReply<PostDto>> {
    let post = state.post_service.view_post(post_id).await?;
    Ok(ok("POST_RETRIEVED", PostDto::from(post)))
}

#[utoipa::path(
    post,
    path = "/v1/posts",
    tag = "posts",
    security(
        ("session_cookie" = [])
    ),
    request_body = PostBodyDto,
    responses(
        (status = 201, description = "POST_CREATED", body = ApiResponse<PostIdDto>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(dto): ApiJson<PostBodyDto>,
) -> AppResult<ApiReply<PostIdDto>> {
    let req = CreatePostRequest {
        title: dto.title.unwrap_or_default(),
        content: dto.content.unwrap_or_default(),
        file_url: dto.file_url,
    };

    let post = state.post_service.create_post(auth.user_id(), req).await?;
    Ok(created("POST_CREATED", PostIdDto { post_id: post.id }))
}

#[utoipa::path(
    patch,
    path = "/v1/posts/{postId}",
    tag = "posts",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("postId" = i64, Path, description = "Post id")
    ),
    request_body = PostBodyDto,
    responses(
        (status = 200, description = "POST_UPDATED", body = ApiResponse<PostDto>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(post_id): ApiPath<i64>,
    ApiJson(dto): ApiJson<PostBodyDto>,
) -> AppResult<ApiReply<PostDto>> {
    let req = UpdatePostRequest {
        title: dto.title.unwrap_or_default(),
        content: dto.content.unwrap_or_default(),
        file_url: dto.file_url,
    };

    let post = state
        .post_service
        .update_post(auth.user_id(), post_id, req)
        .await?;
    Ok(ok("POST_UPDATED", PostDto::from(post)))
}

#[utoipa::path(
    delete,
    path = "/v1/posts/{postId}",
    tag = "posts",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("postId" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "POST_DELETED, data is null"),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Forbidden", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(post_id): ApiPath<i64>,
) -> AppResult<ApiReply<()>> {
    state
        .post_service
        .delete_post(auth.user_id(), post_id)
        .await?;
    Ok(ok("POST_DELETED", ()))
}

#[utoipa::path(
    post,
    path = "/v1/posts/{postId}/likes",
    tag = "posts",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("postId" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 201, description = "POST_LIKED", body = ApiResponse<LikeCountDto>),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub(crate) async fn like_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(post_id): ApiPath<i64>,
) -> AppResult<ApiReply<LikeCountDto>> {
    let like_count = state.post_service.like_post(auth.user_id(), post_id).await?;
    Ok(created("POST_LIKED", LikeCountDto { like_count }))
}

#[utoipa::path(
    delete,
    path = "/v1/posts/{postId}/likes",
    tag = "posts",
    security(
        ("session_cookie" = [])
    ),
    params(
        ("postId" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "POST_UNLIKED", body = ApiResponse<LikeCountDto>),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub(crate) async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(post_id): ApiPath<i64>,
) -> AppResult<ApiReply<LikeCountDto>> {
    let like_count = state
        .post_service
        .unlike_post(auth.user_id(), post_id)
        .await?;
    Ok(ok("POST_UNLIKED", LikeCountDto { like_count }))
}
