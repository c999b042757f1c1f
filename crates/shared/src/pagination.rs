//! Page-based pagination utilities.

use serde::{Deserialize, Serialize};

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: i32 = 50;

/// Maximum allowed page size.
pub const MAX_PER_PAGE: i32 = 100;

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PageParams {
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

impl PageParams {
    /// Clamped page number (1-based).
    pub fn page(&self) -> i32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Clamped page size.
    pub fn per_page(&self) -> i32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// Row offset for the current page.
    pub fn offset(&self) -> i64 {
        ((self.page() - 1) * self.per_page()) as i64
    }

    /// Row limit for the current page.
    pub fn limit(&self) -> i64 {
        self.per_page() as i64
    }
}

/// Pagination metadata returned alongside list data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i32,
    pub per_page: i32,
    pub total: i64,
    pub total_pages: i32,
}

impl Pagination {
    /// Build pagination metadata from the requested params and total row count.
    pub fn new(params: &PageParams, total: i64) -> Self {
        let per_page = params.per_page();
        let total_pages = if total == 0 {
            0
        } else {
            ((total + per_page as i64 - 1) / per_page as i64) as i32
        };
        Self {
            page: params.page(),
            per_page,
            total,
            total_pages,
        }
    }
}
