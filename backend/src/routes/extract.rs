//! Request extractors

use crate::error::ApiError;
use axum::extract::FromRequest;

/// `Json` whose rejections are reported through [`ApiError`], so malformed
/// bodies get the same error envelope as every other failure
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
