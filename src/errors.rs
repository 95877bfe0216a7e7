//! Unified error type for the ledger.
//!
//! Every public operation returns [`Result`]. Variants are disjoint so callers can
//! tell a missing row apart from a denied request or a failing store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The referenced row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Authenticated, but neither the owner nor an elevated role.
    #[error("{message}")]
    Forbidden { message: String },

    /// Input rejected before anything was written.
    #[error("Invalid input: {message}")]
    BadInput { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP-like status code used by the response envelope.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Forbidden { .. } => 403,
            Self::BadInput { .. } => 400,
            Self::Database(_) | Self::Config { .. } | Self::Io(_) => 500,
        }
    }

    pub(crate) fn bad_input(message: impl Into<String>) -> Self {
        Self::BadInput {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
