use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::auth::{
    email_availability, login, logout, me, nickname_availability, signup,
};
use crate::presentation::http::middleware::auth::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/emails/availability", get(email_availability))
        .route("/nicknames/availability", get(nickname_availability));

    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ));

    public.merge(protected)
}
