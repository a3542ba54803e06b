use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::{LoginRequest, SignupRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::envelope::{ApiReply, ApiResponse, created, ok};
use crate::presentation::http::extract::{ApiJson, ApiQuery};
use crate::presentation::http::handlers::users::UserDto;
use crate::presentation::http::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignupDto {
    pub(crate) email: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) password_confirm: Option<String>,
    pub(crate) nickname: Option<String>,
    pub(crate) profile_image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct LoginDto {
    pub(crate) email: Option<String>,
    pub(crate) password: Option<String>,
}

/// The session token travels only in `Set-Cookie`.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LoginResponseDto {
    pub(crate) user: UserDto,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct EmailQuery {
    pub(crate) email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct NicknameQuery {
    pub(crate) nickname: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AvailabilityDto {
    pub(crate) available: bool,
}

#[utoipa::path(
    post,
    path = "/v1/auth/signup",
    tag = "auth",
    request_body = SignupDto,
    responses(
        (status = 201, description = "SIGNUP_SUCCESS, data is null"),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 409, description = "Email or nickname already exists", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn signup(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<SignupDto>,
) -> AppResult<ApiReply<()>> {
    let req = SignupRequest {
        email: dto.email.unwrap_or_default(),
        password: dto.password.unwrap_or_default(),
        password_confirm: dto.password_confirm,
        nickname: dto.nickname.unwrap_or_default(),
        profile_image_url: dto.profile_image_url,
    };

    state.auth_service.signup(req).await?;
    Ok(created("SIGNUP_SUCCESS", ()))
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "LOGIN_SUCCESS, sets the sessionId cookie", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<LoginDto>,
) -> AppResult<Response> {
    let req = LoginRequest {
        email: dto.email.unwrap_or_default(),
        password: dto.password.unwrap_or_default(),
    };

    let result = state.auth_service.login(req).await?;
    let cookie = state.session_cookie.issue(&result.session_token);

    Ok((
        [(header::SET_COOKIE, cookie)],
        ok(
            "LOGIN_SUCCESS",
            LoginResponseDto {
                user: result.user.into(),
            },
        ),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    tag = "auth",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "LOGOUT_SUCCESS, clears the sessionId cookie"),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn logout(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<Response> {
    state.auth_service.logout(&auth.session_token).await?;

    Ok((
        [(header::SET_COOKIE, state.session_cookie.clear())],
        ok("LOGOUT_SUCCESS", ()),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/v1/auth/me",
    tag = "auth",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "USER_RETRIEVED", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub(crate) async fn me(auth: AuthenticatedUser) -> AppResult<ApiReply<UserDto>> {
    Ok(ok("USER_RETRIEVED", UserDto::from(auth.user)))
}

#[utoipa::path(
    get,
    path = "/v1/auth/emails/availability",
    tag = "auth",
    params(
        ("email" = String, Query, description = "Email to check")
    ),
    responses(
        (status = 200, description = "EMAIL_AVAILABLE", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Validation error", body = ErrorBody)
    )
)]
pub(crate) async fn email_availability(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EmailQuery>,
) -> AppResult<ApiReply<AvailabilityDto>> {
    let available = state
        .auth_service
        .email_available(query.email.as_deref().unwrap_or_default())
        .await?;
    Ok(ok("EMAIL_AVAILABLE", AvailabilityDto { available }))
}

#[utoipa::path(
    get,
    path = "/v1/auth/nicknames/availability",
    tag = "auth",
    params(
        ("nickname" = String, Query, description = "Nickname to check")
    ),
    responses(
        (status = 200, description = "NICKNAME_AVAILABLE", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Validation error", body = ErrorBody)
    )
)]
pub(crate) async fn nickname_availability(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NicknameQuery>,
) -> AppResult<ApiReply<AvailabilityDto>> {
    let available = state
        .auth_service
        .nickname_available(query.nickname.as_deref().unwrap_or_default())
        .await?;
    Ok(ok("NICKNAME_AVAILABLE", AvailabilityDto { available }))
}
