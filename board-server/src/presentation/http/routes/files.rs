use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::files::{serve_file, upload_file};

/// Both endpoints are public: profile images are uploaded before signup.
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/files", post(upload_file))
        .route("/public/files/{fileId}", get(serve_file))
}
