mod comment_repository;
mod file_repository;
mod post_repository;
mod session_repository;
mod user_repository;

pub(crate) use comment_repository::PostgresCommentRepository;
pub(crate) use file_repository::PostgresFileRepository;
pub(crate) use post_repository::PostgresPostRepository;
pub(crate) use session_repository::PostgresSessionRepository;
pub(crate) use user_repository::PostgresUserRepository;
