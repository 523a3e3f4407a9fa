//! folder_examinants association table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(schema_name = "documents", table_name = "folder_examinants")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub folder_id: i32,

    #[sea_orm(primary_key, auto_increment = false)]
    pub examinant_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::folder::Entity",
        from = "Column::FolderId",
        to = "super::folder::Column::Id",
        on_delete = "Cascade"
    )]
    Folder,

    #[sea_orm(
        belongs_to = "super::examinant::Entity",
        from = "Column::ExaminantId",
        to = "super::examinant::Column::Id",
        on_delete = "Cascade"
    )]
    Examinant,
}

impl ActiveModelBehavior for ActiveModel {}
