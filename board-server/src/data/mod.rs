use std::sync::Arc;

use sqlx::PgPool;

use self::comment_repository::CommentRepository;
use self::file_repository::FileRepository;
use self::post_repository::PostRepository;
use self::repositories::memory::MemoryStore;
use self::repositories::postgres::{
    PostgresCommentRepository, PostgresFileRepository, PostgresPostRepository,
    PostgresSessionRepository, PostgresUserRepository,
};
use self::session_repository::SessionRepository;
use self::user_repository::UserRepository;

pub(crate) mod comment_repository;
pub(crate) mod file_repository;
pub(crate) mod post_repository;
pub(crate) mod repositories;
pub(crate) mod session_repository;
pub(crate) mod user_repository;

/// Storage handles injected into the application services.
#[derive(Clone)]
pub(crate) struct Repositories {
    pub(crate) users: Arc<dyn UserRepository>,
    pub(crate) sessions: Arc<dyn SessionRepository>,
    pub(crate) posts: Arc<dyn PostRepository>,
    pub(crate) comments: Arc<dyn CommentRepository>,
    pub(crate) files: Arc<dyn FileRepository>,
}

impl Repositories {
    pub(crate) fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            sessions: Arc::new(PostgresSessionRepository::new(pool.clone())),
            posts: Arc::new(PostgresPostRepository::new(pool.clone())),
            comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
            files: Arc::new(PostgresFileRepository::new(pool)),
        }
    }

    /// All handles share one store so cascades see a single consistent state.
    pub(crate) fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            users: store.clone(),
            sessions: store.clone(),
            posts: store.clone(),
            comments: store.clone(),
            files: store,
        }
    }
}
