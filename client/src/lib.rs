//! Authflow Client
//!
//! Validates signup/signin forms locally, calls the backend and hands the
//! resulting tokens to a [`SessionStore`].

mod error;

pub use error::{
    ClientError, SIGNIN_FAILED_MESSAGE, SIGNUP_FAILED_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
};

use authflow_shared::validation::{validate_signin_form, validate_signup_form};
use authflow_shared::{
    ApiResponse, AuthResult, ErrorResponse, SessionStore, SigninForm, SignupForm,
};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info_span, warn, Instrument};

const SIGNUP_PATH: &str = "/v1/auth/signup";
const SIGNIN_PATH: &str = "/v1/auth/signin";

/// HTTP client for the auth endpoints
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    base_url: String,
}

impl AuthClient {
    /// `base_url` is the server origin, e.g. `http://localhost:3000`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate the form and register a new account.
    ///
    /// Only `{name, email, password}` is sent; the confirmation field stays local.
    pub async fn signup(&self, form: &SignupForm) -> Result<AuthResult, ClientError> {
        let request = validate_signup_form(form)?;
        self.post(SIGNUP_PATH, &request, SIGNUP_FAILED_MESSAGE).await
    }

    /// Validate the form and sign in
    pub async fn signin(&self, form: &SigninForm) -> Result<AuthResult, ClientError> {
        let request = validate_signin_form(form)?;
        self.post(SIGNIN_PATH, &request, SIGNIN_FAILED_MESSAGE).await
    }

    /// Sign up and store the session on success
    pub async fn signup_into(
        &self,
        form: &SignupForm,
        session: &SessionStore,
    ) -> Result<(), ClientError> {
        let result = self.signup(form).await?;
        session.apply(result);
        Ok(())
    }

    /// Sign in and store the session on success
    pub async fn signin_into(
        &self,
        form: &SigninForm,
        session: &SessionStore,
    ) -> Result<(), ClientError> {
        let result = self.signin(form).await?;
        session.apply(result);
        Ok(())
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<AuthResult, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let span = info_span!("authflow.request", http.method = "POST", url = %url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .instrument(span)
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&bytes)
                .map(|envelope| envelope.message)
                .ok()
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| fallback.to_string());
            warn!(status = status.as_u16(), %message, "Auth request rejected");
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<AuthResult> =
            serde_json::from_slice(&bytes).map_err(ClientError::Decode)?;
        debug!(user_id = %envelope.data.user.id, "Auth request succeeded");
        Ok(envelope.data)
    }
}
