use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::http::app_error::ErrorBody;
use crate::presentation::http::handlers::auth::{
    AvailabilityDto, LoginDto, LoginResponseDto, SignupDto,
};
use crate::presentation::http::handlers::comments::{
    CommentBodyDto, CommentDto, CommentIdDto, CommentListDto,
};
use crate::presentation::http::handlers::files::{UploadFormDto, UploadedFileDto};
use crate::presentation::http::handlers::posts::{
    LikeCountDto, ListPostsResponseDto, PaginationQuery, PostBodyDto, PostDto, PostIdDto,
};
use crate::presentation::http::handlers::users::{
    ChangePasswordDto, ProfileImageDto, UpdateUserDto, UserDto,
};
use crate::presentation::http::session_cookie::SESSION_COOKIE_NAME;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::health::health,
        crate::presentation::http::handlers::auth::signup,
        crate::presentation::http::handlers::auth::login,
        crate::presentation::http::handlers::auth::logout,
        crate::presentation::http::handlers::auth::me,
        crate::presentation::http::handlers::auth::email_availability,
        crate::presentation::http::handlers::auth::nickname_availability,
        crate::presentation::http::handlers::users::get_me,
        crate::presentation::http::handlers::users::update_me,
        crate::presentation::http::handlers::users::change_password,
        crate::presentation::http::handlers::users::update_profile_image,
        crate::presentation::http::handlers::users::delete_me,
        crate::presentation::http::handlers::users::get_user,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post,
        crate::presentation::http::handlers::posts::like_post,
        crate::presentation::http::handlers::posts::unlike_post,
        crate::presentation::http::handlers::comments::list_comments,
        crate::presentation::http::handlers::comments::create_comment,
        crate::presentation::http::handlers::comments::update_comment,
        crate::presentation::http::handlers::comments::delete_comment,
        crate::presentation::http::handlers::files::upload_file,
        crate::presentation::http::handlers::files::serve_file
    ),
    components(
        schemas(
            ErrorBody,
            SignupDto,
            LoginDto,
            LoginResponseDto,
            AvailabilityDto,
            UserDto,
            UpdateUserDto,
            ChangePasswordDto,
            ProfileImageDto,
            PostBodyDto,
            PaginationQuery,
            PostDto,
            PostIdDto,
            LikeCountDto,
            ListPostsResponseDto,
            CommentBodyDto,
            CommentDto,
            CommentIdDto,
            CommentListDto,
            UploadFormDto,
            UploadedFileDto
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "auth", description = "Signup, login and session endpoints"),
        (name = "users", description = "Account endpoints"),
        (name = "posts", description = "Post and like endpoints"),
        (name = "comments", description = "Comment endpoints"),
        (name = "files", description = "File upload and download")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
        );
        openapi.components = Some(components);
    }
}
