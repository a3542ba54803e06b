use axum::Router;
use axum::middleware;
use axum::routing::{get, patch, post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::comments::{
    create_comment, delete_comment, list_comments, update_comment,
};
use crate::presentation::http::handlers::posts::{
    create_post, delete_post, get_post, like_post, list_posts, unlike_post, update_post,
};
use crate::presentation::http::middleware::auth::session_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_posts))
        .route("/{postId}", get(get_post))
        .route("/{postId}/comments", get(list_comments));

    let protected = Router::new()
        .route("/", post(create_post))
        .route("/{postId}", patch(update_post).delete(delete_post))
        .route("/{postId}/likes", post(like_post).delete(unlike_post))
        .route("/{postId}/comments", post(create_comment))
        .route(
            "/{postId}/comments/{commentId}",
            patch(update_comment).delete(delete_comment),
        )
        .layer(middleware::from_fn_with_state(
            state,
            session_auth_middleware,
        ));

    public.merge(protected)
}
