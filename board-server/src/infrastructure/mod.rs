pub(crate) mod database;
pub mod logging;
pub(crate) mod password;
pub mod settings;
