//! Debt entity - A discrete obligation owed by a debtor.
//!
//! A debt is paid off through its payment schedule. Its images and payment
//! history are owned by the debt and deleted together with it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Debt database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    /// Unique identifier for the debt
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the debtor owing this debt
    pub debtor_id: i64,
    /// What was sold or lent (e.g., "Washing machine")
    pub product_name: String,
    /// Optional free-text note
    pub note: Option<String>,
    /// When the debt was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Debt and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each debt belongs to one debtor
    #[sea_orm(
        belongs_to = "super::debtor::Entity",
        from = "Column::DebtorId",
        to = "super::debtor::Column::Id"
    )]
    Debtor,
    /// One debt has many scheduled payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
    /// One debt has many images
    #[sea_orm(has_many = "super::debt_image::Entity")]
    Images,
    /// One debt has an append-only payment history
    #[sea_orm(has_many = "super::payment_history::Entity")]
    History,
}

impl Related<super::debtor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Debtor.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::debt_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::payment_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
