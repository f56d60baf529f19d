//! Authentication routes
//!
//! `POST /v1/auth/signup` and `POST /v1/auth/signin`. Bodies are checked
//! against the shared validation rules before reaching [`AuthService`].
//! Both answer `201 Created` with `{data: AuthResult, timestamp}`.
//!
//! [`AuthService`]: crate::services::AuthService

use super::extract::AppJson;
use crate::error::ApiResult;
use crate::state::AppState;
use authflow_shared::validation::{validate_signin_request, validate_signup_request};
use authflow_shared::{ApiResponse, AuthResult, SigninRequest, SignupRequest};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

type AuthResponse = (StatusCode, Json<ApiResponse<AuthResult>>);

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
}

/// Register a new user
///
/// POST /v1/auth/signup
async fn signup(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignupRequest>,
) -> ApiResult<AuthResponse> {
    let req = validate_signup_request(req)?;
    let result = state.auth().signup(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(result))))
}

/// Sign in with email and password
///
/// POST /v1/auth/signin
async fn signin(
    State(state): State<AppState>,
    AppJson(req): AppJson<SigninRequest>,
) -> ApiResult<AuthResponse> {
    let req = validate_signin_request(req)?;
    let result = state.auth().signin(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(result))))
}
