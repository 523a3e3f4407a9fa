//! Deposit entity
//!
//! A cash deposit taken when documents are lent out, tied to the lectures
//! it was paid for. Navigation is forward-only: lectures do not enumerate
//! their deposits.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "documents", table_name = "deposits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Amount in cents
    pub price: i64,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    /// Office member who took the deposit
    #[sea_orm(column_type = "Text")]
    pub by_user: String,

    pub date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::lecture::Entity> for Entity {
    fn to() -> RelationDef {
        super::deposit_lectures::Relation::Lecture.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::deposit_lectures::Relation::Deposit.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
