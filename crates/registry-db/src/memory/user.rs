//! In-memory implementation of UserRepository

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::instrument;

use registry_core::entities::{NewUser, User, UserChanges};
use registry_core::error::DomainError;
use registry_core::traits::{RepoResult, UserFilter, UserQuery, UserRepository};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i64, User>,
    /// Last id handed out; ids are never reused, even after delete
    last_id: i64,
}

/// In-memory UserRepository
///
/// Cloning shares the underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.state.read().users.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.state.read().users.is_empty()
    }
}

/// Newest first: `created_at DESC, id DESC`
fn newest_first<'a>(users: impl Iterator<Item = &'a User>) -> Vec<&'a User> {
    let mut sorted: Vec<&User> = users.collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    sorted
}

fn to_usize(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.state.read().users.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &UserQuery) -> RepoResult<Vec<User>> {
        let state = self.state.read();
        let matching = newest_first(state.users.values().filter(|u| query.filter.matches(u)));

        Ok(matching
            .into_iter()
            .skip(to_usize(query.offset))
            .take(to_usize(query.limit))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &UserFilter) -> RepoResult<i64> {
        let state = self.state.read();
        let count = state.users.values().filter(|u| filter.matches(u)).count();
        i64::try_from(count).map_err(|e| DomainError::InternalError(e.to_string()))
    }

    async fn count_created_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        let state = self.state.read();
        let count = state
            .users
            .values()
            .filter(|u| u.created_at >= since)
            .count();
        i64::try_from(count).map_err(|e| DomainError::InternalError(e.to_string()))
    }

    async fn latest(&self, limit: i64) -> RepoResult<Vec<User>> {
        let state = self.state.read();
        Ok(newest_first(state.users.values())
            .into_iter()
            .take(to_usize(limit))
            .cloned()
            .collect())
    }

    async fn search_by_phone(&self, fragment: &str) -> RepoResult<Vec<User>> {
        let state = self.state.read();
        Ok(
            newest_first(state.users.values().filter(|u| u.phone_number.contains(fragment)))
                .into_iter()
                .cloned()
                .collect(),
        )
    }

    #[instrument(skip(self, user))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut state = self.state.write();
        state.last_id += 1;
        let stored = user.clone().into_user(state.last_id);
        state.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i64, changes: &UserChanges) -> RepoResult<User> {
        let mut state = self.state.write();
        let user = state
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;

        user.apply(changes);
        if user.updated_at < user.created_at {
            user.updated_at = user.created_at;
        }
        Ok(user.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.state
            .write()
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::UserNotFound(id))
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
