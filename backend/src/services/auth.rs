//! Signup and signin
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on the blocking thread pool
//! - JWT keys are pre-computed in [`JwtService`]
//!
//! Signup and signin return the same [`AuthResult`] shape so callers
//! handle both the same way.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{NewUser, UserRecord, UserRepository};
use authflow_shared::{AuthResult, SigninRequest, SignupRequest, UserRole};
use metrics::counter;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const USER_ALREADY_EXISTS: &str = "User already exists";
pub const USER_NOT_FOUND: &str = "user not found";
pub const PASSWORD_INCORRECT: &str = "password incorrect";

/// Signup input. The password is only ever hashed, never stored or logged.
pub struct SignupCredentials {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl From<SignupRequest> for SignupCredentials {
    fn from(req: SignupRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: SecretString::new(req.password),
        }
    }
}

/// Signin input
pub struct SigninCredentials {
    pub email: String,
    pub password: SecretString,
}

impl From<SigninRequest> for SigninCredentials {
    fn from(req: SigninRequest) -> Self {
        Self {
            email: req.email,
            password: SecretString::new(req.password),
        }
    }
}

/// Authentication flow over explicit collaborators
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: PasswordService,
    tokens: JwtService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: PasswordService, tokens: JwtService) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new user and sign them in
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn signup(&self, credentials: SignupCredentials) -> Result<AuthResult, ApiError> {
        if self.users.find_by_email(&credentials.email).await?.is_some() {
            counter!("authflow_auth_failures_total", "reason" => "user_exists").increment(1);
            warn!("Signup for an existing email");
            return Err(ApiError::Conflict(USER_ALREADY_EXISTS.to_string()));
        }

        let password_hash = self.passwords.hash_async(credentials.password).await?;

        // The unique index still guards the window between lookup and insert
        let user = self
            .users
            .create(NewUser {
                name: credentials.name,
                email: credentials.email,
                password_hash,
                role: UserRole::default(),
            })
            .await?;

        counter!("authflow_signups_total").increment(1);
        info!(user_id = %user.id, "User signed up");
        self.authenticate(&user)
    }

    /// Check credentials and issue tokens. Never writes to the store.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn signin(&self, credentials: SigninCredentials) -> Result<AuthResult, ApiError> {
        let Some(user) = self.users.find_by_email(&credentials.email).await? else {
            counter!("authflow_auth_failures_total", "reason" => "user_not_found").increment(1);
            warn!("Signin for unknown email");
            return Err(ApiError::Unauthorized(USER_NOT_FOUND.to_string()));
        };

        let valid = self
            .passwords
            .verify_async(credentials.password, user.password_hash.clone())
            .await?;
        if !valid {
            counter!("authflow_auth_failures_total", "reason" => "password_incorrect")
                .increment(1);
            warn!(user_id = %user.id, "Signin with incorrect password");
            return Err(ApiError::Unauthorized(PASSWORD_INCORRECT.to_string()));
        }

        counter!("authflow_signins_total").increment(1);
        info!(user_id = %user.id, "User signed in");
        self.authenticate(&user)
    }

    fn authenticate(&self, user: &UserRecord) -> Result<AuthResult, ApiError> {
        let access_token = self
            .tokens
            .issue_access_token(user.id, &user.email, user.role)?;
        let refresh_token = self.tokens.issue_refresh_token(user.id)?;

        Ok(AuthResult {
            user: user.to_user(),
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryUserRepository, RepositoryError};
    use async_trait::async_trait;
    use axum::http::StatusCode;

    fn service_with(repo: Arc<dyn UserRepository>) -> AuthService {
        AuthService::new(
            repo,
            PasswordService::new(4),
            JwtService::new("test-secret", 3600, 604800),
        )
    }

    fn signup_input(email: &str, password: &str) -> SignupCredentials {
        SignupRequest {
            name: "John Doe".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
        .into()
    }

    fn signin_input(email: &str, password: &str) -> SigninCredentials {
        SigninRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
        .into()
    }

    #[tokio::test]
    async fn test_signup_returns_user_and_tokens() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = service_with(repo.clone());

        let result = service
            .signup(signup_input("john@example.com", "Password@123"))
            .await
            .unwrap();

        assert_eq!(result.user.email, "john@example.com");
        assert_eq!(result.user.role, UserRole::User);
        assert!(!result.access_token.is_empty());
        assert!(!result.refresh_token.is_empty());

        let stored = repo.find_by_email("john@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Password@123");
    }

    #[tokio::test]
    async fn test_signup_tokens_carry_user_claims() {
        let tokens = JwtService::new("test-secret", 3600, 604800);
        let service = service_with(Arc::new(InMemoryUserRepository::new()));

        let result = service
            .signup(signup_input("john@example.com", "Password@123"))
            .await
            .unwrap();

        let access = tokens.decode_access_token(&result.access_token).unwrap();
        assert_eq!(access.sub, result.user.id.to_string());
        assert_eq!(access.email, "john@example.com");
        assert_eq!(access.role, UserRole::User);

        let refresh = tokens.decode_refresh_token(&result.refresh_token).unwrap();
        assert_eq!(refresh.sub, result.user.id.to_string());
    }

    #[tokio::test]
    async fn test_signup_existing_email_conflicts() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = service_with(repo.clone());
        service
            .signup(signup_input("john@example.com", "Password@123"))
            .await
            .unwrap();

        let err = service
            .signup(signup_input("john@example.com", "Other@4567"))
            .await
            .unwrap_err();

        assert!(matches!(&err, ApiError::Conflict(msg) if msg == USER_ALREADY_EXISTS));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_signin_round_trip() {
        let service = service_with(Arc::new(InMemoryUserRepository::new()));
        let signed_up = service
            .signup(signup_input("john@example.com", "Password@123"))
            .await
            .unwrap();

        let signed_in = service
            .signin(signin_input("john@example.com", "Password@123"))
            .await
            .unwrap();

        assert_eq!(signed_in.user, signed_up.user);
        assert!(!signed_in.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_signin_unknown_email() {
        let service = service_with(Arc::new(InMemoryUserRepository::new()));
        let err = service
            .signin(signin_input("ghost@example.com", "Password@123"))
            .await
            .unwrap_err();

        assert!(matches!(&err, ApiError::Unauthorized(msg) if msg == USER_NOT_FOUND));
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signin_wrong_password() {
        let service = service_with(Arc::new(InMemoryUserRepository::new()));
        service
            .signup(signup_input("john@example.com", "Password@123"))
            .await
            .unwrap();

        let err = service
            .signin(signin_input("john@example.com", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(&err, ApiError::Unauthorized(msg) if msg == PASSWORD_INCORRECT));
    }

    #[tokio::test]
    async fn test_signin_does_not_mutate_user() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = service_with(repo.clone());
        service
            .signup(signup_input("john@example.com", "Password@123"))
            .await
            .unwrap();
        let before = repo.find_by_email("john@example.com").await.unwrap();

        for _ in 0..2 {
            service
                .signin(signin_input("john@example.com", "Password@123"))
                .await
                .unwrap();
        }

        assert_eq!(repo.find_by_email("john@example.com").await.unwrap(), before);
        assert_eq!(repo.len().await, 1);
    }

    /// Reports every email as free, so only the store's constraint stops duplicates
    struct RacingRepository(InMemoryUserRepository);

    #[async_trait]
    impl UserRepository for RacingRepository {
        async fn find_by_email(&self, _email: &str) -> Result<Option<UserRecord>, RepositoryError> {
            Ok(None)
        }

        async fn create(&self, user: NewUser) -> Result<UserRecord, RepositoryError> {
            self.0.create(user).await
        }

        async fn health_check(&self) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_duplicate_key_after_lookup_race() {
        let service = service_with(Arc::new(RacingRepository(InMemoryUserRepository::new())));
        service
            .signup(signup_input("john@example.com", "Password@123"))
            .await
            .unwrap();

        let err = service
            .signup(signup_input("john@example.com", "Password@123"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::DuplicateKey(_)));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_internal() {
        let repo = Arc::new(InMemoryUserRepository::new());
        repo.create(NewUser {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password_hash: "plaintext".to_string(),
            role: UserRole::User,
        })
        .await
        .unwrap();

        let err = service_with(repo)
            .signin(signin_input("john@example.com", "Password@123"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
