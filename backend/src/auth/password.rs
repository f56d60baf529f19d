//! Password hashing using bcrypt
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. Request handlers use the
//! `*_async` variants, which run on tokio's blocking thread pool.
//!
//! bcrypt ignores everything past [`MAX_PASSWORD_BYTES`], so longer
//! passwords are refused on hashing and never match on verification.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Cost factor used when none is configured
pub const DEFAULT_HASH_COST: u32 = 10;

/// Longest input bcrypt hashes in full
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing failures
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The stored hash is not a bcrypt hash
    #[error("invalid password hash format: {0}")]
    HashFormat(String),

    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("password is longer than 72 bytes")]
    TooLong,

    #[error("password task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Password hashing service
///
/// Salted one-way hashing with a fixed work factor. Verification goes
/// through bcrypt's own comparison, never plain string equality.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST)
    }
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password (blocking operation)
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong);
        }
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::Hash(e.to_string()))
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// Returns `Ok(false)` on mismatch, including any password longer than
    /// [`MAX_PASSWORD_BYTES`], and `Err(HashFormat)` if `hash` is malformed.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        bcrypt::verify(password, hash).map_err(|e| PasswordError::HashFormat(e.to_string()))
    }

    /// Hash on the blocking thread pool
    pub async fn hash_async(&self, password: SecretString) -> Result<String, PasswordError> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.hash(password.expose_secret())).await?
    }

    /// Verify on the blocking thread pool
    pub async fn verify_async(
        &self,
        password: SecretString,
        hash: String,
    ) -> Result<bool, PasswordError> {
        let service = *self;
        tokio::task::spawn_blocking(move || service.verify(password.expose_secret(), &hash))
            .await?
    }
}
