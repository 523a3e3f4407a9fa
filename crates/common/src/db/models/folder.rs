//! Folder entity
//!
//! A physical folder of printed documents, shelved at an inventory
//! location. The location is required and its lifecycle is owned by the
//! inventory module — the reference does not cascade.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::document::DocumentType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "documents", table_name = "folders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    pub document_type: DocumentType,

    pub location_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id"
    )]
    Location,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::examinant::Entity> for Entity {
    fn to() -> RelationDef {
        super::folder_examinants::Relation::Examinant.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::folder_examinants::Relation::Folder.def().rev())
    }
}

impl Related<super::lecture::Entity> for Entity {
    fn to() -> RelationDef {
        super::folder_lectures::Relation::Lecture.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::folder_lectures::Relation::Folder.def().rev())
    }
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        super::folder_docs::Relation::Document.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::folder_docs::Relation::Folder.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
