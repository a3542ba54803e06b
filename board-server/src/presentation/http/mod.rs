use axum::{Router, routing::get};

use self::app_error::AppError;
use super::AppState;

pub(crate) mod app_error;
pub(crate) mod envelope;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;
pub(crate) mod session_cookie;

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(routes::router(state.clone()))
        .fallback(route_not_found)
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::NotFound
}
