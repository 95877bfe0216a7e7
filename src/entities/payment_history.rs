//! Payment history entity - Append-only audit trail of payment changes.
//!
//! Rows are written when an installment is scheduled and when it is settled.
//! They are never updated, only deleted together with their debt.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// History action recorded when an installment is created
pub const ACTION_SCHEDULED: &str = "scheduled";
/// History action recorded when an installment is settled
pub const ACTION_SETTLED: &str = "settled";

/// Payment history database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the debt the payment belongs to
    pub debt_id: i64,
    /// ID of the payment that changed
    pub payment_id: i64,
    /// Amount of the payment at the time of the change
    pub amount: i64,
    /// Due date of the payment at the time of the change
    pub date: DateTimeUtc,
    /// What happened: `"scheduled"` or `"settled"`
    pub action: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::debt::Entity",
        from = "Column::DebtId",
        to = "super::debt::Column::Id"
    )]
    Debt,
}

impl Related<super::debt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Debt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
