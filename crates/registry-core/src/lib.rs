//! # registry-core
//!
//! Domain layer containing the user entity, value objects, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{NewUser, User, UserChanges};
pub use error::DomainError;
pub use events::{DomainEvent, UserCreatedEvent, UserDeletedEvent, UserUpdatedEvent};
pub use traits::{RepoResult, UserFilter, UserQuery, UserRepository};
pub use value_objects::{
    Address, AddressParseError, PhoneRegion, DEFAULT_PHONE_REGION,
};
