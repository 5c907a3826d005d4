//! Domain events - events emitted when a user record changes
//!
//! Consumed by out-of-band sinks (the spreadsheet log), never by the
//! request path itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::User;

/// All possible domain events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    UserCreated(UserCreatedEvent),
    UserUpdated(UserUpdatedEvent),
    UserDeleted(UserDeletedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::UserCreated(_) => "USER_CREATED",
            Self::UserUpdated(_) => "USER_UPDATED",
            Self::UserDeleted(_) => "USER_DELETED",
        }
    }

    /// Id of the user the event refers to
    pub fn user_id(&self) -> i64 {
        match self {
            Self::UserCreated(e) => e.user_id,
            Self::UserUpdated(e) => e.user_id,
            Self::UserDeleted(e) => e.user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreatedEvent {
    pub user_id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub tg_user: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserCreatedEvent {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            full_name: user.full_name.clone(),
            phone_number: user.phone_number.clone(),
            tg_user: user.tg_user.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdatedEvent {
    pub user_id: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDeletedEvent {
    pub user_id: i64,
}
