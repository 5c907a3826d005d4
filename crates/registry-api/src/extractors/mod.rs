//! Axum extractors for request handling
//!
//! Wrappers that turn axum rejections into `ApiError` bodies.

mod pagination;
mod path;
mod query;
mod validated;

pub use pagination::{Pagination, PaginationParams};
pub use path::UserIdPath;
pub use query::QueryParams;
pub use validated::ValidatedJson;
