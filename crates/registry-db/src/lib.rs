//! # registry-db
//!
//! Storage layer implementing `UserRepository` with PostgreSQL via SQLx,
//! plus an in-memory implementation for tests and local runs.
//!
//! ## Overview
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registry_db::pool::{create_pool, PoolOptions};
//! use registry_db::repositories::PgUserRepository;
//! use registry_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = PoolOptions::new(std::env::var("DATABASE_URL")?);
//!     let pool = create_pool(&options).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::InMemoryUserRepository;
pub use pool::{create_pool, run_migrations, PgPool, PoolOptions};
pub use repositories::PgUserRepository;
