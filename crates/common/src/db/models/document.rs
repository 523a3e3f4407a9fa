//! Document entity
//!
//! An archived exam document: a written exam, an oral exam protocol, or an
//! oral reexam protocol. Price and examinant names are derived on access,
//! never stored.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Department a document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "department")]
pub enum Department {
    #[sea_orm(string_value = "mathematics")]
    #[serde(rename = "mathematics")]
    Mathematics,

    #[sea_orm(string_value = "computer science")]
    #[serde(rename = "computer science")]
    ComputerScience,

    #[sea_orm(string_value = "other")]
    #[serde(rename = "other")]
    Other,
}

impl Department {
    /// Stable label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Mathematics => "mathematics",
            Department::ComputerScience => "computer science",
            Department::Other => "other",
        }
    }
}

/// Availability of a solution for a document. A document without any
/// solution information at all stores NULL instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "solution")]
pub enum Solution {
    #[sea_orm(string_value = "official")]
    #[serde(rename = "official")]
    Official,

    #[sea_orm(string_value = "unofficial")]
    #[serde(rename = "unofficial")]
    Unofficial,

    #[sea_orm(string_value = "none")]
    #[serde(rename = "none")]
    None,
}

/// Kind of exam a document (or a folder of documents) covers.
/// Shared between Document and Folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_type")]
pub enum DocumentType {
    #[sea_orm(string_value = "oral")]
    #[serde(rename = "oral")]
    Oral,

    #[sea_orm(string_value = "written")]
    #[serde(rename = "written")]
    Written,

    #[sea_orm(string_value = "oral reexam")]
    #[serde(rename = "oral reexam")]
    OralReexam,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "documents", table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub department: Department,

    /// Date of the exam, not of submission
    pub date: Date,

    pub number_of_pages: i32,

    pub solution: Option<Solution>,

    #[sea_orm(column_type = "Text")]
    pub comment: String,

    pub document_type: DocumentType,

    pub has_file: bool,

    /// No schema default: callers decide the validation state explicitly
    pub validated: bool,

    pub validation_time: Option<DateTimeWithTimeZone>,

    #[sea_orm(column_type = "Text", nullable)]
    pub submitted_by: Option<String>,

    /// Id in the predecessor archive, kept so its physical barcodes stay
    /// resolvable
    pub legacy_id: Option<i32>,
}

impl Model {
    /// Price of a printed copy in cents. Derived from the current page
    /// count on every call; the per-page price comes from configuration.
    pub fn price(&self, price_per_page: i64) -> i64 {
        price_per_page * i64::from(self.number_of_pages)
    }
}

/// Names of the given examinants, in relationship iteration order.
pub fn examinant_names(examinants: &[super::examinant::Model]) -> Vec<String> {
    examinants.iter().map(|ex| ex.name.clone()).collect()
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::lecture::Entity> for Entity {
    fn to() -> RelationDef {
        super::lecture_docs::Relation::Lecture.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::lecture_docs::Relation::Document.def().rev())
    }
}

impl Related<super::examinant::Entity> for Entity {
    fn to() -> RelationDef {
        super::document_examinants::Relation::Examinant.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::document_examinants::Relation::Document.def().rev())
    }
}

impl Related<super::folder::Entity> for Entity {
    fn to() -> RelationDef {
        super::folder_docs::Relation::Folder.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::folder_docs::Relation::Document.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    fn document(pages: i32) -> Model {
        Model {
            id: 1,
            department: Department::ComputerScience,
            date: Date::from_ymd_opt(2024, 2, 19).unwrap(),
            number_of_pages: pages,
            solution: None,
            comment: String::new(),
            document_type: DocumentType::Written,
            has_file: false,
            validated: false,
            validation_time: None,
            submitted_by: None,
            legacy_id: None,
        }
    }

    #[test]
    fn test_price_scales_with_page_count() {
        let mut doc = document(10);
        assert_eq!(doc.price(5), 50);

        // Recomputed from current state, never cached
        doc.number_of_pages = 3;
        assert_eq!(doc.price(5), 15);
        assert_eq!(document(0).price(5), 0);
    }

    #[test]
    fn test_document_type_values_are_closed() {
        assert_eq!(DocumentType::Oral.to_value(), "oral");
        assert_eq!(DocumentType::Written.to_value(), "written");
        assert_eq!(DocumentType::OralReexam.to_value(), "oral reexam");

        // Values outside the declared set are rejected by the persistence
        // layer, not coerced.
        assert!(DocumentType::try_from_value(&"seminar".to_string()).is_err());
        assert!(Department::try_from_value(&"physics".to_string()).is_err());
        assert!(Solution::try_from_value(&"inofficial".to_string()).is_err());
    }

    #[test]
    fn test_examinant_names_preserve_order() {
        let examinants = vec![
            super::super::examinant::Model { id: 7, name: "Meyer".into(), validated: true },
            super::super::examinant::Model { id: 2, name: "Abel".into(), validated: true },
        ];
        assert_eq!(examinant_names(&examinants), vec!["Meyer", "Abel"]);
    }
}
