//! Client-side failures and the messages shown for them

use authflow_shared::ValidationErrors;
use thiserror::Error;

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup failed. Please try again.";
pub const SIGNIN_FAILED_MESSAGE: &str = "Signin failed. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The form was rejected before any request was sent
    #[error("{0}")]
    Validation(ValidationErrors),

    /// The server answered with an error envelope
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// No response reached us
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered 2xx with a body we could not read
    #[error("malformed response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ClientError {
    /// Text to display next to the form
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(errors) => errors.to_string(),
            ClientError::Server { message, .. } => message.clone(),
            ClientError::Network(_) | ClientError::Decode(_) => {
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        ClientError::Validation(errors)
    }
}
