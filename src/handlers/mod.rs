//! Handler layer - request-level entry points over the core modules.
//!
//! Each handler takes the shared [`AppState`], the acting user and the already
//! deserialized payload, calls into `core`, and wraps the outcome in an
//! [`ApiResponse`](crate::response::ApiResponse). Routing is left to whatever
//! framework embeds this crate.

/// Debt and payment handlers
pub mod debt;
/// Debtor handlers
pub mod debtor;
/// Notification handlers
pub mod notification;

use crate::errors::Error;
use sea_orm::DatabaseConnection;

/// Shared state available to all handlers.
/// Holds the database connection that every operation runs against.
#[derive(Debug)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
}

impl AppState {
    /// Creates a new `AppState` around an established connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// Logs a failed handler call with the status it will be reported as.
pub(crate) fn log_failure(operation: &str, error: &Error) {
    if error.status_code() >= 500 {
        tracing::error!("Error in `{}`: {}", operation, error);
    } else {
        tracing::warn!(status = error.status_code(), "Rejected `{}`: {}", operation, error);
    }
}
