//! User service
//!
//! Reads, writes and aggregates over the user registry.

use chrono::{DateTime, Utc};
use registry_core::entities::{NewUser, User, UserChanges};
use registry_core::traits::{UserFilter, UserQuery};
use registry_core::{Address, DomainEvent, UserCreatedEvent, UserDeletedEvent, UserUpdatedEvent};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CreateUserRequest, LatestQuery, ListUsersQuery, MessageResponse, PageRequest,
    PhoneSearchQuery, UpdateUserRequest, UserListResponse, UserResponse, UserStatsResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message returned by a successful delete
pub const USER_DELETED_MESSAGE: &str = "User deleted successfully";

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List users, newest first, with optional category and search filters
    #[instrument(skip(self))]
    pub async fn list_users(&self, query: ListUsersQuery) -> ServiceResult<UserListResponse> {
        let page = query.page_request();
        let filter = UserFilter {
            address: query.address,
            search: query.search,
        };
        self.page_of(filter, page).await
    }

    /// List users filed under one category
    #[instrument(skip(self))]
    pub async fn list_by_address(
        &self,
        address: Address,
        page: PageRequest,
    ) -> ServiceResult<UserListResponse> {
        self.page_of(UserFilter::by_address(address), page).await
    }

    async fn page_of(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> ServiceResult<UserListResponse> {
        let repo = self.ctx.user_repo();
        let total = repo.count(&filter).await?;
        let users = repo
            .list(&UserQuery {
                filter,
                limit: page.limit,
                offset: page.offset(),
            })
            .await?;

        Ok(UserListResponse {
            users: users.iter().map(UserResponse::from).collect(),
            total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages(total),
        })
    }

    /// Get user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: i64) -> ServiceResult<UserResponse> {
        let user = self.get_user_entity(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Get user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: i64) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }

    /// Most recently created users
    #[instrument(skip(self))]
    pub async fn latest_users(&self, query: LatestQuery) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().latest(query.clamped_limit()).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Users whose phone number contains the given fragment
    #[instrument(skip(self))]
    pub async fn search_by_phone(
        &self,
        query: PhoneSearchQuery,
    ) -> ServiceResult<Vec<UserResponse>> {
        query.validate()?;
        let users = self
            .ctx
            .user_repo()
            .search_by_phone(query.phone.trim())
            .await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Aggregate counters; "today" is the current UTC calendar day
    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<UserStatsResponse> {
        let repo = self.ctx.user_repo();
        let since = start_of_utc_day(Utc::now());

        Ok(UserStatsResponse {
            total_users: repo.count(&UserFilter::default()).await?,
            address_a_users: repo.count(&UserFilter::by_address(Address::A)).await?,
            address_b_users: repo.count(&UserFilter::by_address(Address::B)).await?,
            today_registrations: repo.count_created_since(since).await?,
        })
    }

    /// Register a new user
    #[instrument(skip(self, request))]
    pub async fn create_user(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        request.validate()?;

        let user = self.ctx.user_repo().create(&NewUser::from(request)).await?;
        info!(user_id = user.id, "User created");

        self.ctx
            .publish(DomainEvent::UserCreated(UserCreatedEvent::from(&user)));

        Ok(UserResponse::from(&user))
    }

    /// Apply a partial update
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        request.validate()?;

        // Verify user exists
        let _user = self.get_user_entity(user_id).await?;

        let changes = UserChanges::from(request);
        let user = self.ctx.user_repo().update(user_id, &changes).await?;
        info!(user_id, fields_changed = !changes.is_empty(), "User updated");

        self.ctx.publish(DomainEvent::UserUpdated(UserUpdatedEvent {
            user_id,
            updated_at: user.updated_at,
        }));

        Ok(UserResponse::from(&user))
    }

    /// Permanently remove a user
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: i64) -> ServiceResult<MessageResponse> {
        // Verify user exists
        let _user = self.get_user_entity(user_id).await?;

        self.ctx.user_repo().delete(user_id).await?;
        info!(user_id, "User deleted");

        self.ctx
            .publish(DomainEvent::UserDeleted(UserDeletedEvent { user_id }));

        Ok(MessageResponse::new(USER_DELETED_MESSAGE))
    }
}

fn start_of_utc_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(now, |midnight| midnight.and_utc())
}
