pub(crate) mod application;
pub(crate) mod data;
pub(crate) mod domain;
pub mod infrastructure;
pub(crate) mod presentation;
pub mod server;
