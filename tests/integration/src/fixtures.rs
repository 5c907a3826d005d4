//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create user request
#[derive(Debug, Clone, Serialize)]
pub struct CreateUser {
    pub full_name: String,
    pub phone_number: String,
    pub tg_user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl CreateUser {
    pub fn eshmat() -> Self {
        Self {
            full_name: "Eshmat".to_string(),
            phone_number: "+998933211232".to_string(),
            tg_user: "Gap".to_string(),
            address: None,
        }
    }

    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            full_name: format!("Test User {suffix}"),
            phone_number: format!("+99890{:07}", suffix % 10_000_000),
            tg_user: format!("@tester{suffix}"),
            address: None,
        }
    }

    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }
}

/// User response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub tg_user: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of users
#[derive(Debug, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

/// Aggregate counters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsResponse {
    pub total_users: i64,
    pub address_a_users: i64,
    pub address_b_users: i64,
    pub today_registrations: i64,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
