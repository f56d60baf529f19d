//! Application error handling
//!
//! Handlers and services return [`ApiError`]; its `IntoResponse` impl is
//! the single place where errors become HTTP statuses and
//! `{statusCode, message, timestamp}` bodies. Internal details are logged,
//! never sent.

use crate::auth::PasswordError;
use crate::repositories::RepositoryError;
use authflow_shared::{ErrorResponse, ValidationErrors};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{debug, error};

pub const INVALID_DATA_MESSAGE: &str = "Validation error: Invalid data provided.";
pub const DUPLICATE_ENTRY_MESSAGE: &str =
    "Duplicate entry error: A record with the same unique field already exists.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const TIMEOUT_MESSAGE: &str = "Request timeout";

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unique constraint hit in the store, e.g. two signups racing for one email
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The request outlived the server's time limit
    #[error("Request timed out")]
    Timeout,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[source] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) | ApiError::DuplicateKey(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the caller
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Validation(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Conflict(msg)
            | ApiError::NotFound(msg) => msg.clone(),
            ApiError::DuplicateKey(_) => DUPLICATE_ENTRY_MESSAGE.to_string(),
            ApiError::Timeout => TIMEOUT_MESSAGE.to_string(),
            ApiError::Internal(_) | ApiError::Database(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateKey(constraint) => ApiError::DuplicateKey(constraint),
            RepositoryError::Database(err) => ApiError::Database(err),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(err.into())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(reason = %rejection.body_text(), "Rejected request body");
        ApiError::Validation(INVALID_DATA_MESSAGE.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(err) => error!("Internal error: {:?}", err),
            ApiError::Database(err) => error!("Database error: {:?}", err),
            ApiError::DuplicateKey(constraint) => debug!(%constraint, "Duplicate key"),
            _ => {}
        }

        let status = self.status();
        let body = Json(ErrorResponse::new(status.as_u16(), self.public_message()));
        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
