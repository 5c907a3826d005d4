//! User entity - represents a registered person

use chrono::{DateTime, Utc};

use crate::value_objects::Address;

/// User entity as stored in the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub tg_user: String,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check whether the user belongs to the given category
    #[inline]
    pub fn is_in(&self, address: Address) -> bool {
        self.address == Some(address)
    }

    /// Apply a partial update in place
    ///
    /// Only fields present in `changes` are replaced; `updated_at` is always bumped.
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(full_name) = &changes.full_name {
            self.full_name.clone_from(full_name);
        }
        if let Some(phone_number) = &changes.phone_number {
            self.phone_number.clone_from(phone_number);
        }
        if let Some(tg_user) = &changes.tg_user {
            self.tg_user.clone_from(tg_user);
        }
        if let Some(address) = changes.address {
            self.address = Some(address);
        }
        self.updated_at = changes.updated_at;
    }
}

/// Data required to insert a user; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub phone_number: String,
    pub tg_user: String,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Create insert data stamped with the current time
    pub fn new(full_name: String, phone_number: String, tg_user: String) -> Self {
        Self {
            full_name,
            phone_number,
            tg_user,
            address: None,
            created_at: Utc::now(),
        }
    }

    /// Set the category
    #[must_use]
    pub fn with_address(mut self, address: Option<Address>) -> Self {
        self.address = address;
        self
    }

    /// Materialize the stored entity once an id has been assigned
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            full_name: self.full_name,
            phone_number: self.phone_number,
            tg_user: self.tg_user,
            address: self.address,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Partial update; `None` fields keep their stored value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub tg_user: Option<String>,
    pub address: Option<Address>,
    pub updated_at: DateTime<Utc>,
}

impl UserChanges {
    /// Empty change set stamped with the current time
    pub fn now() -> Self {
        Self {
            full_name: None,
            phone_number: None,
            tg_user: None,
            address: None,
            updated_at: Utc::now(),
        }
    }

    /// True if no field besides the timestamp is being changed
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.phone_number.is_none()
            && self.tg_user.is_none()
            && self.address.is_none()
    }
}
