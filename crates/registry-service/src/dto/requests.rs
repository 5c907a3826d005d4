//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use std::borrow::Cow;

use registry_core::{Address, DEFAULT_PHONE_REGION};
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Reject empty and whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// Check the number against the configured phone region
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    if DEFAULT_PHONE_REGION.is_valid(value) {
        return Ok(());
    }
    let mut err = ValidationError::new("phone_number");
    err.message = Some(Cow::Owned(format!(
        "must be a valid {DEFAULT_PHONE_REGION} phone number"
    )));
    Err(err)
}

// ============================================================================
// User Requests
// ============================================================================

/// Create user request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 255, message = "Full name must be at most 255 characters")
    )]
    pub full_name: String,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,

    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 255, message = "Telegram user must be at most 255 characters")
    )]
    pub tg_user: String,

    #[serde(default)]
    pub address: Option<Address>,
}

/// Partial user update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 255, message = "Full name must be at most 255 characters")
    )]
    pub full_name: Option<String>,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,

    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 255, message = "Telegram user must be at most 255 characters")
    )]
    pub tg_user: Option<String>,

    pub address: Option<Address>,
}
