//! Debt image entity - Name of an uploaded picture attached to a debt
//! (a receipt, a contract scan, ...).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Debt image database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debt_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub debt_id: i64,
    /// Stored file name
    pub name: String,
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
