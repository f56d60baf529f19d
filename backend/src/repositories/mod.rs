//! Data access layer

pub mod memory;
pub mod user;

pub use memory::InMemoryUserRepository;
pub use user::{NewUser, PgUserRepository, RepositoryError, UserRecord, UserRepository};
