//! Query-string DTOs and page arithmetic

use registry_core::Address;
use serde::Deserialize;
use validator::Validate;

use super::requests::validate_not_blank;

/// Default page size
pub const DEFAULT_PAGE_LIMIT: i64 = 10;
/// Maximum page size
pub const MAX_PAGE_LIMIT: i64 = 50;

/// Filters accepted by `GET /users`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ListUsersQuery {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// `GET /users/latest`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

impl LatestQuery {
    /// Requested count clamped to `1..=MAX_PAGE_LIMIT`
    pub fn clamped_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT)
    }
}

/// `GET /users/search/phone`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PhoneSearchQuery {
    #[validate(custom(function = "validate_not_blank"))]
    pub phone: String,
}

/// Clamped page position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Out-of-range values are clamped rather than rejected
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        }
    }

    /// Rows to skip
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// `ceil(total / limit)`
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        (total + self.limit - 1) / self.limit
    }
}
