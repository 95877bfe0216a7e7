//! Role-based access checks.
//!
//! Sellers may only manage their own debtors. `ADMIN` and `SUPER_ADMIN` users
//! bypass the ownership check.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the acting user, as supplied by the authentication context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular seller account, limited to its own resources
    #[default]
    Seller,
    /// Administrator
    Admin,
    /// Administrator with full rights
    SuperAdmin,
}

impl Role {
    /// Whether this role may act on resources it does not own.
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl From<&str> for Role {
    /// Unknown role names fall back to the owner-only default.
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Self::Admin,
            "SUPER_ADMIN" => Self::SuperAdmin,
            _ => Self::Seller,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Seller => "SELLER",
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPER_ADMIN",
        };
        f.write_str(name)
    }
}

/// The user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// User id; for sellers this is the seller id
    pub id: i64,
    /// Role granted by the authentication layer
    pub role: Role,
}

impl Actor {
    /// A plain seller acting on its own behalf.
    #[must_use]
    pub const fn seller(id: i64) -> Self {
        Self {
            id,
            role: Role::Seller,
        }
    }

    /// Whether the actor may manage a resource owned by `owner_id`.
    #[must_use]
    pub const fn can_manage(&self, owner_id: i64) -> bool {
        self.id == owner_id || self.role.is_elevated()
    }
}

/// Fails with [`Error::Forbidden`] unless `actor` owns the resource or has an elevated role.
pub fn ensure_can_manage(owner_id: i64, actor: &Actor) -> Result<()> {
    if actor.can_manage(owner_id) {
        Ok(())
    } else {
        tracing::warn!(
            actor_id = actor.id,
            role = %actor.role,
            owner_id,
            "Access denied"
        );
        Err(Error::Forbidden {
            message: "Access denied".to_string(),
        })
    }
}
