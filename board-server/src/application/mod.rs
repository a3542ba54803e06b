pub(crate) mod auth_service;
pub(crate) mod comment_service;
pub(crate) mod file_service;
pub(crate) mod post_service;
pub(crate) mod user_service;
