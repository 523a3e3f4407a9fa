//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations with proper
//! error handling and transaction support. Pricing is handed in at
//! construction; nothing reads process-wide state.
//!
//! Loading discipline mirrors the relationship declarations: lecture and
//! examinant document lists are paginated on demand, folder details load
//! their location joined and their examinants/lectures in one query each.

use crate::config::PricingConfig;
use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// Input for creating a document together with its association rows
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub department: Department,
    pub date: NaiveDate,
    pub number_of_pages: i32,
    pub solution: Option<Solution>,
    pub comment: String,
    pub document_type: DocumentType,
    pub validated: bool,
    pub submitted_by: Option<String>,
    pub legacy_id: Option<i32>,
    pub lecture_ids: Vec<i32>,
    pub examinant_ids: Vec<i32>,
}

/// Input for creating a folder together with its association rows
#[derive(Debug, Clone)]
pub struct NewFolder {
    pub name: String,
    pub document_type: DocumentType,
    pub location_id: i32,
    pub lecture_ids: Vec<i32>,
    pub examinant_ids: Vec<i32>,
}

/// A document with its relationships materialized
#[derive(Debug, Clone)]
pub struct DocumentDetail {
    pub document: Document,
    pub lectures: Vec<Lecture>,
    pub examinants: Vec<Examinant>,
}

/// A folder with its eagerly loaded relationships
#[derive(Debug, Clone)]
pub struct FolderDetail {
    pub folder: Folder,
    pub location: Location,
    pub examinants: Vec<Examinant>,
    pub lectures: Vec<Lecture>,
}

/// A deposit with the lectures it was taken for
#[derive(Debug, Clone)]
pub struct DepositDetail {
    pub deposit: Deposit,
    pub lectures: Vec<Lecture>,
}

/// Row counts for the administrative overview
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArchiveCounts {
    pub lectures: u64,
    pub documents: u64,
    pub examinants: u64,
    pub folders: u64,
    pub deposits: u64,
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
    pricing: PricingConfig,
}

impl Repository {
    /// Create a new repository with the given connection pool and pricing
    pub fn new(pool: DbPool, pricing: PricingConfig) -> Self {
        Self { pool, pricing }
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    /// Get the write connection
    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }

    /// Price of a printed copy of `document`, in cents
    pub fn document_price(&self, document: &Document) -> i64 {
        document.price(self.pricing.price_per_page)
    }

    /// Configured default deposit amount, in cents
    pub fn deposit_price(&self) -> i64 {
        self.pricing.deposit_price
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Lecture Operations
    // ========================================================================

    /// Create a new lecture
    pub async fn create_lecture(
        &self,
        name: String,
        aliases: Vec<String>,
        comment: String,
        validated: bool,
    ) -> Result<Lecture> {
        let lecture = LectureActiveModel {
            name: Set(name),
            aliases: Set(aliases),
            comment: Set(comment),
            validated: Set(validated),
            ..Default::default()
        };

        lecture.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Find lecture by ID
    pub async fn find_lecture_by_id(&self, id: i32) -> Result<Option<Lecture>> {
        LectureEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List lectures with pagination
    pub async fn list_lectures(&self, page: u64, per_page: u64) -> Result<(Vec<Lecture>, u64)> {
        let paginator = LectureEntity::find()
            .order_by_asc(LectureColumn::Name)
            .paginate(self.read_conn(), per_page);

        let total = paginator.num_items().await?;
        let lectures = paginator.fetch_page(page).await?;

        Ok((lectures, total))
    }

    /// Delete lecture by ID; association rows cascade, documents and
    /// folders on the other side stay intact
    pub async fn delete_lecture(&self, id: i32) -> Result<bool> {
        let result = LectureEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Documents of a lecture, filtered and paginated on demand.
    ///
    /// A lecture without documents yields an empty page; a missing lecture
    /// is a distinguishable not-found error.
    pub async fn documents_of_lecture(
        &self,
        lecture_id: i32,
        document_type: Option<DocumentType>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Document>, u64)> {
        let lecture = self
            .find_lecture_by_id(lecture_id)
            .await?
            .ok_or(AppError::LectureNotFound { id: lecture_id })?;

        let mut query = lecture.find_related(DocumentEntity);
        if let Some(document_type) = document_type {
            query = query.filter(DocumentColumn::DocumentType.eq(document_type));
        }

        let paginator = query
            .order_by_asc(DocumentColumn::Date)
            .paginate(self.read_conn(), per_page);

        let total = paginator.num_items().await?;
        let documents = paginator.fetch_page(page).await?;

        Ok((documents, total))
    }

    // ========================================================================
    // Examinant Operations
    // ========================================================================

    /// Create a new examinant
    pub async fn create_examinant(&self, name: String, validated: bool) -> Result<Examinant> {
        let examinant = ExaminantActiveModel {
            name: Set(name),
            validated: Set(validated),
            ..Default::default()
        };

        examinant.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Find examinant by ID
    pub async fn find_examinant_by_id(&self, id: i32) -> Result<Option<Examinant>> {
        ExaminantEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List examinants with pagination
    pub async fn list_examinants(&self, page: u64, per_page: u64) -> Result<(Vec<Examinant>, u64)> {
        let paginator = ExaminantEntity::find()
            .order_by_asc(ExaminantColumn::Name)
            .paginate(self.read_conn(), per_page);

        let total = paginator.num_items().await?;
        let examinants = paginator.fetch_page(page).await?;

        Ok((examinants, total))
    }

    /// Delete examinant by ID
    pub async fn delete_examinant(&self, id: i32) -> Result<bool> {
        let result = ExaminantEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Documents of an examinant, filtered and paginated on demand
    pub async fn documents_of_examinant(
        &self,
        examinant_id: i32,
        document_type: Option<DocumentType>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Document>, u64)> {
        let examinant = self
            .find_examinant_by_id(examinant_id)
            .await?
            .ok_or(AppError::ExaminantNotFound { id: examinant_id })?;

        let mut query = examinant.find_related(DocumentEntity);
        if let Some(document_type) = document_type {
            query = query.filter(DocumentColumn::DocumentType.eq(document_type));
        }

        let paginator = query
            .order_by_asc(DocumentColumn::Date)
            .paginate(self.read_conn(), per_page);

        let total = paginator.num_items().await?;
        let documents = paginator.fetch_page(page).await?;

        Ok((documents, total))
    }

    // ========================================================================
    // Document Operations
    // ========================================================================

    /// Create a document and its lecture/examinant links in one transaction
    pub async fn create_document(&self, input: NewDocument) -> Result<Document> {
        let txn = self.write_conn().begin().await?;

        let document = DocumentActiveModel {
            department: Set(input.department),
            date: Set(input.date),
            number_of_pages: Set(input.number_of_pages),
            solution: Set(input.solution),
            comment: Set(input.comment),
            document_type: Set(input.document_type),
            has_file: Set(false),
            validated: Set(input.validated),
            validation_time: Set(None),
            submitted_by: Set(input.submitted_by),
            legacy_id: Set(input.legacy_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !input.lecture_ids.is_empty() {
            lecture_docs::Entity::insert_many(input.lecture_ids.iter().map(|&lecture_id| {
                lecture_docs::ActiveModel {
                    lecture_id: Set(lecture_id),
                    document_id: Set(document.id),
                }
            }))
            .exec(&txn)
            .await?;
        }

        if !input.examinant_ids.is_empty() {
            document_examinants::Entity::insert_many(input.examinant_ids.iter().map(
                |&examinant_id| document_examinants::ActiveModel {
                    document_id: Set(document.id),
                    examinant_id: Set(examinant_id),
                },
            ))
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(document)
    }

    /// Find document by ID
    pub async fn find_document_by_id(&self, id: i32) -> Result<Option<Document>> {
        DocumentEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find documents by IDs (print jobs reference several at once)
    pub async fn find_documents_by_ids(&self, ids: &[i32]) -> Result<Vec<Document>> {
        DocumentEntity::find()
            .filter(DocumentColumn::Id.is_in(ids.iter().copied()))
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// A document with lectures and examinants materialized
    pub async fn document_detail(&self, id: i32) -> Result<DocumentDetail> {
        let document = self
            .find_document_by_id(id)
            .await?
            .ok_or(AppError::DocumentNotFound { id })?;

        let lectures = document
            .find_related(LectureEntity)
            .order_by_asc(LectureColumn::Name)
            .all(self.read_conn())
            .await?;

        let examinants = document
            .find_related(ExaminantEntity)
            .all(self.read_conn())
            .await?;

        Ok(DocumentDetail {
            document,
            lectures,
            examinants,
        })
    }

    /// Mark a document as validated and stamp the validation time
    pub async fn validate_document(&self, id: i32) -> Result<Document> {
        let mut document: DocumentActiveModel = DocumentEntity::find_by_id(id)
            .one(self.write_conn())
            .await?
            .ok_or(AppError::DocumentNotFound { id })?
            .into();

        document.validated = Set(true);
        document.validation_time = Set(Some(chrono::Utc::now().into()));

        document.update(self.write_conn()).await.map_err(Into::into)
    }

    /// Delete document by ID
    pub async fn delete_document(&self, id: i32) -> Result<bool> {
        let result = DocumentEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Folder Operations
    // ========================================================================

    /// Create a folder and its association rows in one transaction.
    ///
    /// The location is required; a dangling location id fails the foreign
    /// key and surfaces as a database error.
    pub async fn create_folder(&self, input: NewFolder) -> Result<Folder> {
        let txn = self.write_conn().begin().await?;

        let folder = FolderActiveModel {
            name: Set(input.name),
            document_type: Set(input.document_type),
            location_id: Set(input.location_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !input.lecture_ids.is_empty() {
            folder_lectures::Entity::insert_many(input.lecture_ids.iter().map(|&lecture_id| {
                folder_lectures::ActiveModel {
                    folder_id: Set(folder.id),
                    lecture_id: Set(lecture_id),
                }
            }))
            .exec(&txn)
            .await?;
        }

        if !input.examinant_ids.is_empty() {
            folder_examinants::Entity::insert_many(input.examinant_ids.iter().map(
                |&examinant_id| folder_examinants::ActiveModel {
                    folder_id: Set(folder.id),
                    examinant_id: Set(examinant_id),
                },
            ))
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(folder)
    }

    /// List folders with their locations joined in
    pub async fn list_folders(&self) -> Result<Vec<(Folder, Option<Location>)>> {
        FolderEntity::find()
            .find_also_related(LocationEntity)
            .order_by_asc(FolderColumn::Name)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// A folder with location joined and examinants/lectures loaded in one
    /// extra query each
    pub async fn folder_detail(&self, id: i32) -> Result<FolderDetail> {
        let (folder, location) = FolderEntity::find_by_id(id)
            .find_also_related(LocationEntity)
            .one(self.read_conn())
            .await?
            .ok_or(AppError::FolderNotFound { id })?;

        // location_id is NOT NULL with an enforced foreign key
        let location = location.ok_or_else(|| AppError::Internal {
            message: format!("folder {} has no location row", id),
        })?;

        let examinants = folder
            .find_related(ExaminantEntity)
            .all(self.read_conn())
            .await?;

        let lectures = folder
            .find_related(LectureEntity)
            .order_by_asc(LectureColumn::Name)
            .all(self.read_conn())
            .await?;

        Ok(FolderDetail {
            folder,
            location,
            examinants,
            lectures,
        })
    }

    /// Delete folder by ID
    pub async fn delete_folder(&self, id: i32) -> Result<bool> {
        let result = FolderEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Record documents as printed in a folder. Re-recording an already
    /// printed document is a no-op, not an error.
    pub async fn record_printed_docs(&self, folder_id: i32, document_ids: &[i32]) -> Result<()> {
        FolderEntity::find_by_id(folder_id)
            .one(self.read_conn())
            .await?
            .ok_or(AppError::FolderNotFound { id: folder_id })?;

        if document_ids.is_empty() {
            return Ok(());
        }

        let insert = folder_docs::Entity::insert_many(document_ids.iter().map(|&document_id| {
            folder_docs::ActiveModel {
                folder_id: Set(folder_id),
                document_id: Set(document_id),
            }
        }))
        .on_conflict(
            OnConflict::columns([folder_docs::Column::FolderId, folder_docs::Column::DocumentId])
                .do_nothing()
                .to_owned(),
        )
        .exec(self.write_conn())
        .await;

        match insert {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    // ========================================================================
    // Deposit Operations
    // ========================================================================

    /// Create a deposit and its lecture links in one transaction
    pub async fn create_deposit(
        &self,
        price: i64,
        name: String,
        by_user: String,
        lecture_ids: Vec<i32>,
    ) -> Result<Deposit> {
        let txn = self.write_conn().begin().await?;

        let deposit = DepositActiveModel {
            price: Set(price),
            name: Set(name),
            by_user: Set(by_user),
            date: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !lecture_ids.is_empty() {
            deposit_lectures::Entity::insert_many(lecture_ids.iter().map(|&lecture_id| {
                deposit_lectures::ActiveModel {
                    deposit_id: Set(deposit.id),
                    lecture_id: Set(lecture_id),
                }
            }))
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;

        Ok(deposit)
    }

    /// A deposit with the lectures it was taken for
    pub async fn deposit_detail(&self, id: i32) -> Result<DepositDetail> {
        let deposit = DepositEntity::find_by_id(id)
            .one(self.read_conn())
            .await?
            .ok_or(AppError::DepositNotFound { id })?;

        let lectures = deposit
            .find_related(LectureEntity)
            .order_by_asc(LectureColumn::Name)
            .all(self.read_conn())
            .await?;

        Ok(DepositDetail { deposit, lectures })
    }

    /// List deposits with pagination, newest first
    pub async fn list_deposits(&self, page: u64, per_page: u64) -> Result<(Vec<Deposit>, u64)> {
        let paginator = DepositEntity::find()
            .order_by_desc(DepositColumn::Date)
            .paginate(self.read_conn(), per_page);

        let total = paginator.num_items().await?;
        let deposits = paginator.fetch_page(page).await?;

        Ok((deposits, total))
    }

    /// Settle (delete) a deposit; its lecture links cascade
    pub async fn settle_deposit(&self, id: i32) -> Result<bool> {
        let result = DepositEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Administrative Overview
    // ========================================================================

    /// Row counts per entity table
    pub async fn entity_counts(&self) -> Result<ArchiveCounts> {
        let conn = self.read_conn();

        Ok(ArchiveCounts {
            lectures: LectureEntity::find().count(conn).await?,
            documents: DocumentEntity::find().count(conn).await?,
            examinants: ExaminantEntity::find().count(conn).await?,
            folders: FolderEntity::find().count(conn).await?,
            deposits: DepositEntity::find().count(conn).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn pricing() -> PricingConfig {
        PricingConfig {
            price_per_page: 5,
            deposit_price: 500,
        }
    }

    fn repo_with(conn: sea_orm::DatabaseConnection) -> Repository {
        Repository::new(
            DbPool {
                primary: std::sync::Arc::new(conn),
                replica: None,
            },
            pricing(),
        )
    }

    #[tokio::test]
    async fn test_find_lecture_by_id() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![Lecture {
                id: 42,
                name: "Algorithmen I".to_string(),
                aliases: vec!["Algo".to_string()],
                comment: String::new(),
                validated: true,
            }]])
            .into_connection();

        let repo = repo_with(conn);
        let lecture = repo.find_lecture_by_id(42).await.unwrap().unwrap();
        assert_eq!(lecture.name, "Algorithmen I");
    }

    #[tokio::test]
    async fn test_documents_of_missing_lecture_is_not_found() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Lecture>::new()])
            .into_connection();

        let repo = repo_with(conn);
        let err = repo
            .documents_of_lecture(42, None, 0, 50)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::LectureNotFound { id: 42 }));
    }

    #[tokio::test]
    async fn test_delete_reports_missing_rows() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([sea_orm::MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = repo_with(conn);
        assert!(!repo.delete_lecture(7).await.unwrap());
    }

    #[test]
    fn test_document_price_uses_configured_rate() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = repo_with(conn);

        let document = Document {
            id: 1,
            department: Department::Mathematics,
            date: chrono::NaiveDate::from_ymd_opt(2023, 7, 12).unwrap(),
            number_of_pages: 10,
            solution: Some(Solution::Official),
            comment: String::new(),
            document_type: DocumentType::Written,
            has_file: true,
            validated: true,
            validation_time: None,
            submitted_by: None,
            legacy_id: Some(1311),
        };

        assert_eq!(repo.document_price(&document), 50);
    }
}
