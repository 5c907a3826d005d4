//! User model -> entity mapper

use registry_core::entities::{NewUser, User, UserChanges};
use registry_core::error::DomainError;
use registry_core::value_objects::Address;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let address = model
            .address
            .as_deref()
            .map(str::parse::<Address>)
            .transpose()
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(User {
            id: model.id,
            full_name: model.full_name,
            phone_number: model.phone_number,
            tg_user: model.tg_user,
            address,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Column values for inserting a user
pub struct UserInsert<'a> {
    pub full_name: &'a str,
    pub phone_number: &'a str,
    pub tg_user: &'a str,
    pub address: Option<&'static str>,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a NewUser) -> Self {
        Self {
            full_name: &user.full_name,
            phone_number: &user.phone_number,
            tg_user: &user.tg_user,
            address: user.address.map(Address::as_str),
        }
    }
}

/// Column values for a partial update; `None` keeps the stored value
pub struct UserUpdate<'a> {
    pub full_name: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub tg_user: Option<&'a str>,
    pub address: Option<&'static str>,
}

impl<'a> UserUpdate<'a> {
    pub fn new(changes: &'a UserChanges) -> Self {
        Self {
            full_name: changes.full_name.as_deref(),
            phone_number: changes.phone_number.as_deref(),
            tg_user: changes.tg_user.as_deref(),
            address: changes.address.map(Address::as_str),
        }
    }
}
