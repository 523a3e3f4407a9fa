//! Lecture entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "documents", table_name = "lectures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    /// Alternate names the lecture is known under
    pub aliases: Vec<String>,

    #[sea_orm(column_type = "Text")]
    pub comment: String,

    /// No schema default: callers decide the validation state explicitly
    pub validated: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        super::lecture_docs::Relation::Document.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::lecture_docs::Relation::Lecture.def().rev())
    }
}

impl Related<super::folder::Entity> for Entity {
    fn to() -> RelationDef {
        super::folder_lectures::Relation::Folder.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::folder_lectures::Relation::Lecture.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
