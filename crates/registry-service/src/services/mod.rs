//! Business logic services
//!
//! Service layer handling validation and orchestration of repository calls.

pub mod context;
pub mod error;
pub mod user;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use user::{UserService, USER_DELETED_MESSAGE};
