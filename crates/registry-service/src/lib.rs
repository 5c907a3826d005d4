//! # registry-service
//!
//! Application layer containing business logic, services, DTOs, and the
//! spreadsheet sink.

pub mod dto;
pub mod services;
pub mod sink;

pub use dto::{
    CreateUserRequest, HealthResponse, LatestQuery, ListUsersQuery, MessageResponse, PageRequest,
    PhoneSearchQuery, ReadinessResponse, UpdateUserRequest, UserListResponse, UserResponse,
    UserStatsResponse,
};
pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService};
pub use sink::{SpreadsheetSink, UserEventSink};
