//! Model to entity mappers
//!
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert`/`*Update` structs: Prepare entity data for database operations

mod user;

pub use user::{UserInsert, UserUpdate};
