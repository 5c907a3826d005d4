//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{NewUser, User, UserChanges};
use crate::error::DomainError;
use crate::value_objects::Address;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Query types
// ============================================================================

/// Filter shared by listing and counting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Equality filter on the category
    pub address: Option<Address>,
    /// Case-insensitive substring matched against name, phone and handle
    pub search: Option<String>,
}

impl UserFilter {
    /// Filter on a single category
    pub fn by_address(address: Address) -> Self {
        Self {
            address: Some(address),
            search: None,
        }
    }

    /// Search term with surrounding whitespace removed, `None` if blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// In-process evaluation of the filter
    pub fn matches(&self, user: &User) -> bool {
        if let Some(address) = self.address {
            if !user.is_in(address) {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => {
                let term = term.to_lowercase();
                user.full_name.to_lowercase().contains(&term)
                    || user.phone_number.to_lowercase().contains(&term)
                    || user.tg_user.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

/// Offset pagination over a filtered, newest-first listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    pub filter: UserFilter,
    pub limit: i64,
    pub offset: i64,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// List a page of users matching the filter, newest first
    async fn list(&self, query: &UserQuery) -> RepoResult<Vec<User>>;

    /// Count users matching the filter
    async fn count(&self, filter: &UserFilter) -> RepoResult<i64>;

    /// Count users created at or after `since`
    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64>;

    /// Most recently created users, newest first
    async fn latest(&self, limit: i64) -> RepoResult<Vec<User>>;

    /// Users whose phone number contains `fragment`, newest first
    async fn search_by_phone(&self, fragment: &str) -> RepoResult<Vec<User>>;

    /// Insert a new user and return it with its assigned id
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Apply a partial update and return the stored result
    async fn update(&self, id: i64, changes: &UserChanges) -> RepoResult<User>;

    /// Hard delete a user
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> RepoResult<()>;
}
