//! Debtor entity - A person or business owing money to a seller.
//!
//! Debtors carry free-text contact details and a `star` flag sellers use to pin
//! favorites. Phones, images, debts and notifications hang off the debtor and are
//! removed explicitly, in order, when the debtor is deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Debtor database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debtors")]
pub struct Model {
    /// Unique identifier for the debtor
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the seller who owns this debtor
    pub seller_id: i64,
    /// Full name as entered by the seller
    pub name: String,
    /// Free-text address
    pub address: String,
    /// Optional free-text note
    pub note: Option<String>,
    /// Favorite flag
    pub star: bool,
    /// When the debtor was created
    pub created_at: DateTimeUtc,
    /// When the debtor was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Debtor and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each debtor belongs to one seller
    #[sea_orm(
        belongs_to = "super::seller::Entity",
        from = "Column::SellerId",
        to = "super::seller::Column::Id"
    )]
    Seller,
    /// One debtor has many phone numbers
    #[sea_orm(has_many = "super::debtor_phone::Entity")]
    Phones,
    /// One debtor has many images
    #[sea_orm(has_many = "super::debtor_image::Entity")]
    Images,
    /// One debtor has many debts
    #[sea_orm(has_many = "super::debt::Entity")]
    Debts,
    /// One debtor has many notifications
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::seller::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seller.def()
    }
}

impl Related<super::debtor_phone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phones.def()
    }
}

impl Related<super::debtor_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::debt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Debts.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
