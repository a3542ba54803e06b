pub(crate) mod auth;
pub(crate) mod comments;
pub(crate) mod files;
pub(crate) mod health;
pub(crate) mod posts;
pub(crate) mod users;
