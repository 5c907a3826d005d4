//! User handlers
//!
//! Endpoints for registering, querying and maintaining users.

use axum::{extract::State, Json};
use registry_core::Address;
use registry_service::{
    CreateUserRequest, LatestQuery, ListUsersQuery, MessageResponse, PhoneSearchQuery,
    UpdateUserRequest, UserListResponse, UserResponse, UserService, UserStatsResponse,
};

use crate::extractors::{Pagination, QueryParams, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List users
///
/// GET /users?page&limit&address&search
pub async fn list_users(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListUsersQuery>,
) -> ApiResult<Json<UserListResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.list_users(query).await?;
    Ok(Json(response))
}

/// List users in category a
///
/// GET /users/address-a
pub async fn list_address_a(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<Json<UserListResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.list_by_address(Address::A, page).await?;
    Ok(Json(response))
}

/// List users in category b
///
/// GET /users/address-b
pub async fn list_address_b(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<Json<UserListResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.list_by_address(Address::B, page).await?;
    Ok(Json(response))
}

/// Newest users
///
/// GET /users/latest?limit
pub async fn latest_users(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<LatestQuery>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.latest_users(query).await?;
    Ok(Json(response))
}

/// Substring search on phone numbers
///
/// GET /users/search/phone?phone
pub async fn search_by_phone(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PhoneSearchQuery>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.search_by_phone(query).await?;
    Ok(Json(response))
}

/// Aggregate counters
///
/// GET /users/stats/summary
pub async fn user_stats(State(state): State<AppState>) -> ApiResult<Json<UserStatsResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.stats().await?;
    Ok(Json(response))
}

/// Get user by ID
///
/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}

/// Register a user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.create_user(request).await?;
    Ok(Created(Json(response)))
}

/// Partially update a user
///
/// PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_user(user_id, request).await?;
    Ok(Json(response))
}

/// Delete a user
///
/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.delete_user(user_id).await?;
    Ok(Json(response))
}
