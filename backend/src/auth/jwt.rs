//! JWT token issuance and validation
//!
//! Access tokens carry `{sub, email, role}`. Refresh tokens carry only
//! `{sub}` and live longer. Keys are derived once and shared behind `Arc`.

use anyhow::Result;
use authflow_shared::UserRole;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Refresh token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Pre-computed JWT keys
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token lifetimes in seconds
#[derive(Debug, Clone, Copy)]
pub struct TokenTtl {
    pub access_secs: i64,
    pub refresh_secs: i64,
}

/// JWT service for token operations
///
/// Create once at startup and share; cloning only bumps reference counts.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    ttl: TokenTtl,
}

impl JwtService {
    pub fn new(secret: &str, access_token_expiry_secs: i64, refresh_token_expiry_secs: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            ttl: TokenTtl {
                access_secs: access_token_expiry_secs,
                refresh_secs: refresh_token_expiry_secs,
            },
        }
    }

    /// Sign an access token for a user
    pub fn issue_access_token(&self, user_id: Uuid, email: &str, role: UserRole) -> Result<String> {
        let (iat, exp) = self.window(self.ttl.access_secs);
        let claims = AccessClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat,
            exp,
        };
        self.sign(&claims, "access")
    }

    /// Sign a refresh token for a user
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String> {
        let (iat, exp) = self.window(self.ttl.refresh_secs);
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            iat,
            exp,
        };
        self.sign(&claims, "refresh")
    }

    /// Check signature and expiry of an access token
    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims> {
        self.verify(token)
    }

    /// Check signature and expiry of a refresh token
    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims> {
        self.verify(token)
    }

    #[inline]
    pub fn ttl(&self) -> TokenTtl {
        self.ttl
    }

    fn window(&self, ttl_secs: i64) -> (i64, i64) {
        let now = Utc::now();
        (now.timestamp(), (now + Duration::seconds(ttl_secs)).timestamp())
    }

    fn sign<C: Serialize>(&self, claims: &C, kind: &str) -> Result<String> {
        encode(&Header::default(), claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate {} token: {}", kind, e))
    }

    fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C> {
        let data = decode::<C>(token, &self.keys.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;
        Ok(data.claims)
    }
}
