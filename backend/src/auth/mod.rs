//! Authentication primitives
//!
//! JWT issuance and bcrypt password hashing.

mod jwt;
mod password;

pub use jwt::{AccessClaims, JwtService, RefreshClaims, TokenTtl};
pub use password::{PasswordError, PasswordService, DEFAULT_HASH_COST, MAX_PASSWORD_BYTES};
