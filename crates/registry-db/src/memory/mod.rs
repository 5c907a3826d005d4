//! In-memory repository implementations
//!
//! Backed by process memory; contents are lost on restart.

mod user;

pub use user::InMemoryUserRepository;
