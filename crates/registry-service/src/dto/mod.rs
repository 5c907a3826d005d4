//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Query-string DTOs and page arithmetic
//! - Response DTOs for serializing API outputs
//! - Mappers between domain entities and DTOs

pub mod mappers;
pub mod queries;
pub mod requests;
pub mod responses;

pub use queries::{
    LatestQuery, ListUsersQuery, PageRequest, PhoneSearchQuery, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT,
};
pub use requests::{
    validate_not_blank, validate_phone_number, CreateUserRequest, UpdateUserRequest,
};
pub use responses::{
    HealthChecks, HealthResponse, MessageResponse, ReadinessResponse, UserListResponse,
    UserResponse, UserStatsResponse,
};
