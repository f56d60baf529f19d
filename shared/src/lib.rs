//! Authflow Shared Library
//!
//! Wire types, validation rules and session state shared by the backend
//! and the client.

pub mod models;
pub mod session;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use models::{UnknownRole, User, UserRole};
pub use session::{SessionState, SessionStore, SubscriptionId};
pub use types::*;
pub use validation::{ValidationError, ValidationErrors};
