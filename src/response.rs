//! Uniform response envelope returned by the handlers.
//!
//! Successful calls carry a payload, a message and a status code, plus page
//! metadata for listings. Failures are rendered from [`Error`] with the status
//! from [`Error::status_code`].

use crate::{core::pagination::Page, errors::Error};
use serde::Serialize;

/// Pagination metadata attached to listing responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Success envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> ApiResponse<T> {
    /// Wraps `data` with a message and status code.
    pub fn success(data: T, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            status_code,
            message: message.into(),
            data,
            meta: None,
        }
    }

    /// Attaches pagination metadata.
    #[must_use]
    pub const fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Wraps a page, moving its counters into the metadata.
    pub fn page(page: Page<T>, message: impl Into<String>) -> Self {
        let meta = PageMeta {
            total: page.total,
            page: page.page,
            limit: page.limit,
        };
        Self::success(page.items, message, 200).with_meta(meta)
    }
}

/// Failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        Self {
            status_code: error.status_code(),
            message: error.to_string(),
        }
    }
}
