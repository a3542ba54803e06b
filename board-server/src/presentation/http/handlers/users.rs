use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::{ChangePasswordRequest, UpdateProfileRequest, User};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::envelope::{ApiReply, ApiResponse, ok};
use crate::presentation::http::extract::{ApiJson, ApiPath};
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDto {
    pub(crate) user_id: i64,
    pub(crate) email: String,
    pub(crate) nickname: String,
    pub(crate) profile_image_url: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            nickname: user.nickname,
            profile_image_url: user.profile_image_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateUserDto {
    pub(crate) nickname: Option<String>,
    pub(crate) profile_image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChangePasswordDto {
    pub(crate) password: Option<String>,
    pub(crate) password_confirm: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileImageDto {
    pub(crate) profile_image_url: Option<String>,
}

#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "users",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "USER_RETRIEVED", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub(crate) async fn get_me(auth: AuthenticatedUser) -> AppResult<ApiReply<UserDto>> {
    Ok(ok("USER_RETRIEVED", UserDto::from(auth.user)))
}

#[utoipa::path(
    patch,
    path = "/v1/users/me",
    tag = "users",
    security(
        ("session_cookie" = [])
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "USER_UPDATED", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 409, description = "Nickname already exists", body = ErrorBody)
    )
)]
pub(crate) async fn update_me(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(dto): ApiJson<UpdateUserDto>,
) -> AppResult<ApiReply<UserDto>> {
    let req = UpdateProfileRequest {
        nickname: dto.nickname.unwrap_or_default(),
        profile_image_url: dto.profile_image_url,
    };

    let user = state
        .user_service
        .update_profile(auth.user_id(), req)
        .await?;
    Ok(ok("USER_UPDATED", UserDto::from(user)))
}

#[utoipa::path(
    patch,
    path = "/v1/users/me/password",
    tag = "users",
    security(
        ("session_cookie" = [])
    ),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "PASSWORD_UPDATED, data is null"),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub(crate) async fn change_password(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(dto): ApiJson<ChangePasswordDto>,
) -> AppResult<ApiReply<()>> {
    let req = ChangePasswordRequest {
        password: dto.password.unwrap_or_default(),
        password_confirm: dto.password_confirm.unwrap_or_default(),
    };

    state
        .user_service
        .change_password(auth.user_id(), req)
        .await?;
    Ok(ok("PASSWORD_UPDATED", ()))
}

#[utoipa::path(
    patch,
    path = "/v1/users/me/profile-image-url",
    tag = "users",
    security(
        ("session_cookie" = [])
    ),
    request_body = ProfileImageDto,
    responses(
        (status = 200, description = "PROFILE_IMAGE_UPDATED", body = ApiResponse<ProfileImageDto>),
        (status = 400, description = "Blank url", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub(crate) async fn update_profile_image(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(dto): ApiJson<ProfileImageDto>,
) -> AppResult<ApiReply<ProfileImageDto>> {
    let user = state
        .user_service
        .update_profile_image(auth.user_id(), dto.profile_image_url)
        .await?;

    Ok(ok(
        "PROFILE_IMAGE_UPDATED",
        ProfileImageDto {
            profile_image_url: user.profile_image_url,
        },
    ))
}

#[utoipa::path(
    delete,
    path = "/v1/users/me",
    tag = "users",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "USER_DELETED, clears the sessionId cookie"),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub(crate) async fn delete_me(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<Response> {
    state.user_service.delete_account(auth.user_id()).await?;

    Ok((
        [(header::SET_COOKIE, state.session_cookie.clear())],
        ok("USER_DELETED", ()),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/v1/users/{userId}",
    tag = "users",
    params(
        ("userId" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "USER_RETRIEVED", body = ApiResponse<UserDto>),
        (status = 404, description = "User not found", body = ErrorBody)
    )
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> AppResult<ApiReply<UserDto>> {
    let user = state.user_service.get_user(user_id).await?;
    Ok(ok("USER_RETRIEVED", UserDto::from(user)))
}
