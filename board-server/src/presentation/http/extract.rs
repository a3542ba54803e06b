use axum::extract::{FromRequest, FromRequestParts};

use super::app_error::AppError;

/// `Json` whose rejections render as a `BAD_REQUEST` error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub(crate) struct ApiJson<T>(pub(crate) T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub(crate) struct ApiQuery<T>(pub(crate) T);

/// Unparsable ids are answered with `NOT_FOUND`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub(crate) struct ApiPath<T>(pub(crate) T);
