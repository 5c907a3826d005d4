//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in registry-core.

mod error;
mod user;

pub use user::PgUserRepository;
