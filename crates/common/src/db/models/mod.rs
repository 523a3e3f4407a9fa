//! SeaORM entity models
//!
//! The documents schema: five entity tables, six pure association tables,
//! and the inventory-owned location table folders point at.

mod deposit;
mod document;
mod examinant;
mod folder;
mod lecture;
mod location;

// Association tables, used qualified (e.g. `models::lecture_docs::Entity`)
pub mod deposit_lectures;
pub mod document_examinants;
pub mod folder_docs;
pub mod folder_examinants;
pub mod folder_lectures;
pub mod lecture_docs;

pub use lecture::{
    Entity as LectureEntity,
    Model as Lecture,
    ActiveModel as LectureActiveModel,
    Column as LectureColumn,
};

pub use document::{
    examinant_names,
    Department,
    DocumentType,
    Entity as DocumentEntity,
    Model as Document,
    ActiveModel as DocumentActiveModel,
    Column as DocumentColumn,
    Solution,
};

pub use examinant::{
    Entity as ExaminantEntity,
    Model as Examinant,
    ActiveModel as ExaminantActiveModel,
    Column as ExaminantColumn,
};

pub use folder::{
    Entity as FolderEntity,
    Model as Folder,
    ActiveModel as FolderActiveModel,
    Column as FolderColumn,
};

pub use deposit::{
    Entity as DepositEntity,
    Model as Deposit,
    ActiveModel as DepositActiveModel,
    Column as DepositColumn,
};

pub use location::{
    Entity as LocationEntity,
    Model as Location,
    ActiveModel as LocationActiveModel,
    Column as LocationColumn,
};

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::ForeignKeyAction;
    use sea_orm::RelationTrait;

    #[test]
    fn test_association_tables_cascade_on_both_sides() {
        // Removing either side of a many-to-many row removes the join rows
        // referencing it; the entities across the association stay.
        let defs = [
            lecture_docs::Relation::Lecture.def(),
            lecture_docs::Relation::Document.def(),
            document_examinants::Relation::Document.def(),
            document_examinants::Relation::Examinant.def(),
            folder_docs::Relation::Folder.def(),
            folder_docs::Relation::Document.def(),
            folder_lectures::Relation::Folder.def(),
            folder_lectures::Relation::Lecture.def(),
            folder_examinants::Relation::Folder.def(),
            folder_examinants::Relation::Examinant.def(),
            deposit_lectures::Relation::Deposit.def(),
            deposit_lectures::Relation::Lecture.def(),
        ];

        for def in defs {
            assert_eq!(def.on_delete, Some(ForeignKeyAction::Cascade));
        }
    }

    #[test]
    fn test_folder_location_reference_does_not_cascade() {
        // Location lifecycle is owned by the inventory module.
        let def = super::folder::Relation::Location.def();
        assert_eq!(def.on_delete, None);
    }
}
