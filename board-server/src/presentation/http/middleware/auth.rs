use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::domain::user::User;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppError;
use crate::presentation::http::session_cookie::read_session_token;

/// The caller resolved from the `sessionId` cookie.
#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser {
    pub(crate) user: User,
    pub(crate) session_token: String,
}

impl AuthenticatedUser {
    pub(crate) fn user_id(&self) -> i64 {
        self.user.id
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

pub(crate) async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = read_session_token(request.headers())
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let user = state
        .auth_service
        .authenticate(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(AuthenticatedUser {
        user,
        session_token: token,
    });

    Ok(next.run(request).await)
}
