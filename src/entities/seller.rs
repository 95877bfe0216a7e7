//! Seller entity - The tenant account that owns debtors.
//!
//! Every debtor belongs to exactly one seller, and notifications are attributed
//! to the seller who recorded them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Seller database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sellers")]
pub struct Model {
    /// Unique identifier for the seller
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the seller
    pub name: String,
    /// Login email, unique across sellers
    #[sea_orm(unique)]
    pub email: String,
    /// When the seller was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Seller and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One seller owns many debtors
    #[sea_orm(has_many = "super::debtor::Entity")]
    Debtors,
    /// One seller sends many notifications
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::debtor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Debtors.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
