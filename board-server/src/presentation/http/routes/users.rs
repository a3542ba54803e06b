use axum::Router;
use axum::middleware;
use axum::routing::{get, patch};

use crate::presentation::AppState;
use crate::presentation::http::handlers::users::{
    change_password, delete_me, get_me, get_user, update_me, update_profile_image,
};
use crate::presentation::http::middleware::auth::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/{userId}", get(get_user));

    let protected = Router::new()
        .route("/me", get(get_me).patch(update_me).delete(delete_me))
        .route("/me/password", patch(change_password))
        .route("/me/profile-image-url", patch(update_profile_image))
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ));

    public.merge(protected)
}
