//! Examinant entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "documents", table_name = "examinants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    /// No schema default: callers decide the validation state explicitly
    pub validated: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        super::document_examinants::Relation::Document.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::document_examinants::Relation::Examinant.def().rev())
    }
}

impl Related<super::folder::Entity> for Entity {
    fn to() -> RelationDef {
        super::folder_examinants::Relation::Folder.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::folder_examinants::Relation::Examinant.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
