//! Page/limit handling shared by the listing operations.
//!
//! `page` defaults to 1 before the offset is computed, and page 0 is treated as
//! page 1, so the first page always starts at offset 0. Without a `limit` the
//! whole result set is returned.

use serde::{Deserialize, Serialize};

/// Requested page, 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number
    #[serde(default)]
    pub page: Option<u64>,
    /// Page size; `None` returns everything
    #[serde(default)]
    pub limit: Option<u64>,
}

impl Pagination {
    /// Creates a pagination request for `page` of size `limit`.
    #[must_use]
    pub const fn new(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// The page number after defaulting.
    #[must_use]
    pub fn page_number(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Rows to skip, or `None` when no limit was requested.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        self.limit
            .map(|limit| (self.page_number() - 1).saturating_mul(limit))
    }
}

/// One page of results plus the metadata callers need to request the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Rows on this page
    pub items: Vec<T>,
    /// Number of matching rows ignoring pagination
    pub total: u64,
    /// Page as requested
    pub page: Option<u64>,
    /// Limit as requested
    pub limit: Option<u64>,
}

impl<T> Page<T> {
    pub(crate) const fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            limit: pagination.limit,
        }
    }
}
