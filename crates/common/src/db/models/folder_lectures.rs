//! folder_lectures association table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(schema_name = "documents", table_name = "folder_lectures")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub folder_id: i32,

    #[sea_orm(primary_key, auto_increment = false)]
    pub lecture_id: i32,
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
        belongs_to = "super::lecture::Entity",
        from = "Column::LectureId",
        to = "super::lecture::Column::Id",
        on_delete = "Cascade"
    )]
    Lecture,
}

impl ActiveModelBehavior for ActiveModel {}
