//! Debtor image entity - Name of an uploaded picture attached to a debtor.
//! Only the stored file name is kept here; the file itself lives elsewhere.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Debtor image database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "debtor_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub debtor_id: i64,
    /// Stored file name
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::debtor::Entity",
        from = "Column::DebtorId",
        to = "super::debtor::Column::Id"
    )]
    Debtor,
}

impl Related<super::debtor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Debtor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
