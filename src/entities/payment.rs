//! Payment entity - One installment of a debt's payment schedule.
//!
//! `amount` is an integer number of minor currency units. `is_active` marks
//! installments that are still outstanding; settled ones stay in the table with
//! `is_active = false` so the schedule remains visible.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the debt this installment belongs to
    pub debt_id: i64,
    /// Installment amount in minor units
    pub amount: i64,
    /// Due date
    pub date: DateTimeUtc,
    /// Whether the installment is still outstanding
    pub is_active: bool,
    /// When the installment was scheduled
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one debt
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
