//! Entity to DTO mappers, and request DTOs to domain inputs

use registry_core::entities::{NewUser, User, UserChanges};

use super::requests::{CreateUserRequest, UpdateUserRequest};
use super::responses::UserResponse;

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            phone_number: user.phone_number.clone(),
            tg_user: user.tg_user.clone(),
            address: user.address,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        NewUser::new(request.full_name, request.phone_number, request.tg_user)
            .with_address(request.address)
    }
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            full_name: request.full_name,
            phone_number: request.phone_number,
            tg_user: request.tg_user,
            address: request.address,
            ..UserChanges::now()
        }
    }
}
