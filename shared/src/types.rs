//! API request and response types

use crate::models::User;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Signup request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Signin request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Signup form as filled in by the user.
///
/// `confirm_password` is checked locally and never leaves the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Payload sent to the backend
    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Signin form as filled in by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigninForm {
    pub email: String,
    pub password: String,
}

impl SigninForm {
    pub fn to_request(&self) -> SigninRequest {
        SigninRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Successful signup/signin payload.
///
/// Both endpoints return this exact shape so callers can handle them the same way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Success envelope: `{data, timestamp}` with the timestamp in epoch milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Error envelope: `{statusCode, message, timestamp}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub timestamp: i64,
}

impl ErrorResponse {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
