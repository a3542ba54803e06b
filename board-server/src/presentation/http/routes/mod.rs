use axum::Router;

use crate::presentation::AppState;

pub(crate) mod auth;
pub(crate) mod files;
pub(crate) mod posts;
pub(crate) mod users;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/v1/auth", auth::router(state.clone()))
        .nest("/v1/users", users::router(state.clone()))
        .nest("/v1/posts", posts::router(state))
        .merge(files::router())
}
