use std::sync::Arc;

use chrono::TimeDelta;

use crate::application::auth_service::AuthService;
use crate::application::comment_service::CommentService;
use crate::application::file_service::FileService;
use crate::application::post_service::PostService;
use crate::application::user_service::UserService;
use crate::data::Repositories;
use crate::infrastructure::password::PasswordService;
use crate::infrastructure::settings::Settings;

use self::http::session_cookie::SessionCookie;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService>,
    pub(crate) user_service: Arc<UserService>,
    pub(crate) post_service: Arc<PostService>,
    pub(crate) comment_service: Arc<CommentService>,
    pub(crate) file_service: Arc<FileService>,
    pub(crate) session_cookie: SessionCookie,
}

impl AppState {
    pub(crate) fn new(repos: Repositories, settings: &Settings) -> Self {
        let passwords = PasswordService::new();
        let session_ttl = TimeDelta::seconds(settings.session_ttl_seconds);

        Self {
            auth_service: Arc::new(AuthService::new(
                repos.users.clone(),
                repos.sessions.clone(),
                passwords.clone(),
                session_ttl,
            )),
            user_service: Arc::new(UserService::new(repos.users.clone(), passwords)),
            post_service: Arc::new(PostService::new(repos.posts.clone())),
            comment_service: Arc::new(CommentService::new(repos.posts, repos.comments)),
            file_service: Arc::new(FileService::new(repos.files)),
            session_cookie: SessionCookie::new(
                settings.session_ttl_seconds,
                settings.session_cookie_secure,
            ),
        }
    }
}
