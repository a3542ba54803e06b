pub(crate) mod auth;
pub(crate) mod cors;
pub(crate) mod layer_errors;
pub(crate) mod trace;
