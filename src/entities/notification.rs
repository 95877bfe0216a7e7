//! Notification entity - A message a seller recorded for a debtor.
//!
//! Delivery is outside this crate; `is_sended` is stamped when the row is created.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// Unique identifier for the notification
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the debtor the message is about
    pub debtor_id: i64,
    /// ID of the seller who recorded it
    pub seller_id: i64,
    /// Installment a generated reminder is about; `None` for manual notifications
    pub payment_id: Option<i64>,
    /// Message text
    pub message: String,
    /// Whether the message has been sent
    pub is_sended: bool,
    /// When the notification was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Notification and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each notification is about one debtor
    #[sea_orm(
        belongs_to = "super::debtor::Entity",
        from = "Column::DebtorId",
        to = "super::debtor::Column::Id"
    )]
    Debtor,
    /// Each notification was recorded by one seller
    #[sea_orm(
        belongs_to = "super::seller::Entity",
        from = "Column::SellerId",
        to = "super::seller::Column::Id"
    )]
    Seller,
}

impl Related<super::debtor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Debtor.def()
    }
}

impl Related<super::seller::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seller.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
