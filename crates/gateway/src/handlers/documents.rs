//! Document handlers
//!
//! Submission is open to everyone (students hand in their protocols);
//! validation and removal require an office session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use folio_common::{
    auth::SessionUser,
    db::models::{examinant_names, Department, Document, DocumentType, Solution},
    errors::{AppError, Result},
    metrics,
};

/// Request to submit a new document
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitDocumentRequest {
    pub department: Department,

    /// Date of the exam
    pub date: NaiveDate,

    #[validate(range(min = 0))]
    #[serde(default)]
    pub number_of_pages: i32,

    pub solution: Option<Solution>,

    #[serde(default)]
    pub comment: String,

    pub document_type: DocumentType,

    /// Explicit by design: the schema has no default for this flag
    pub validated: bool,

    pub submitted_by: Option<String>,

    /// Barcode id in the predecessor archive, if known
    pub legacy_id: Option<i32>,

    #[serde(default)]
    pub lecture_ids: Vec<i32>,

    #[serde(default)]
    pub examinant_ids: Vec<i32>,
}

/// Query parameters for the per-lecture and per-examinant document lists
#[derive(Debug, Deserialize)]
pub struct DocumentFilterQuery {
    #[serde(default)]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    /// Restrict the page to one exam kind
    pub document_type: Option<DocumentType>,
}

fn default_per_page() -> u64 {
    50
}

impl DocumentFilterQuery {
    /// Page and a per-page size clamped to a sane range
    pub fn clamped(&self) -> (u64, u64) {
        (self.page, self.per_page.clamp(1, 200))
    }
}

/// A document as returned by the API. Price is derived from the current
/// page count on every request.
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: i32,
    pub department: Department,
    pub date: NaiveDate,
    pub number_of_pages: i32,
    pub solution: Option<Solution>,
    pub comment: String,
    pub document_type: DocumentType,
    pub has_file: bool,
    pub validated: bool,
    pub validation_time: Option<String>,
    pub submitted_by: Option<String>,
    pub legacy_id: Option<i32>,
    /// Price of a printed copy in cents
    pub price: i64,
}

impl DocumentResponse {
    pub fn new(document: Document, price: i64) -> Self {
        Self {
            id: document.id,
            department: document.department,
            date: document.date,
            number_of_pages: document.number_of_pages,
            solution: document.solution,
            comment: document.comment,
            document_type: document.document_type,
            has_file: document.has_file,
            validated: document.validated,
            validation_time: document.validation_time.map(|dt| dt.to_rfc3339()),
            submitted_by: document.submitted_by,
            legacy_id: document.legacy_id,
            price,
        }
    }
}

/// A document with its relationships materialized
#[derive(Debug, Serialize)]
pub struct DocumentDetailResponse {
    #[serde(flatten)]
    pub document: DocumentResponse,
    pub lectures: Vec<String>,
    pub examinants: Vec<String>,
}

/// Page of documents
#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

pub(crate) fn document_page(
    state: &AppState,
    documents: Vec<Document>,
    total: u64,
    page: u64,
    per_page: u64,
) -> DocumentListResponse {
    let documents = documents
        .into_iter()
        .map(|document| {
            let price = state.repo.document_price(&document);
            DocumentResponse::new(document, price)
        })
        .collect();

    DocumentListResponse {
        documents,
        total,
        page,
        per_page,
    }
}

/// Submit a new document to the archive
pub async fn submit_document(
    State(state): State<AppState>,
    Json(request): Json<SubmitDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let document = state
        .repo
        .create_document(folio_common::db::NewDocument {
            department: request.department,
            date: request.date,
            number_of_pages: request.number_of_pages,
            solution: request.solution,
            comment: request.comment,
            document_type: request.document_type,
            validated: request.validated,
            submitted_by: request.submitted_by,
            legacy_id: request.legacy_id,
            lecture_ids: request.lecture_ids,
            examinant_ids: request.examinant_ids,
        })
        .await?;

    metrics::record_document_submitted(document.department.as_str());

    tracing::info!(
        document_id = document.id,
        department = document.department.as_str(),
        "Document submitted"
    );

    let price = state.repo.document_price(&document);
    Ok((StatusCode::CREATED, Json(DocumentResponse::new(document, price))))
}

/// Get a document with lectures, examinant names, and derived price
pub async fn get_document(
    State(state): State<AppState>,
    Path(document_id): Path<i32>,
) -> Result<Json<DocumentDetailResponse>> {
    let detail = state.repo.document_detail(document_id).await?;

    let price = state.repo.document_price(&detail.document);
    let lectures = detail.lectures.into_iter().map(|l| l.name).collect();
    let examinants = examinant_names(&detail.examinants);

    Ok(Json(DocumentDetailResponse {
        document: DocumentResponse::new(detail.document, price),
        lectures,
        examinants,
    }))
}

/// Mark a document as validated
pub async fn validate_document(
    State(state): State<AppState>,
    user: SessionUser,
    Path(document_id): Path<i32>,
) -> Result<Json<DocumentResponse>> {
    let document = state.repo.validate_document(document_id).await?;

    tracing::info!(
        document_id = document.id,
        by = %user.username,
        "Document validated"
    );

    let price = state.repo.document_price(&document);
    Ok(Json(DocumentResponse::new(document, price)))
}

/// Delete a document
pub async fn delete_document(
    State(state): State<AppState>,
    user: SessionUser,
    Path(document_id): Path<i32>,
) -> Result<StatusCode> {
    if !state.repo.delete_document(document_id).await? {
        return Err(AppError::DocumentNotFound { id: document_id });
    }

    tracing::info!(
        document_id = document_id,
        by = %user.username,
        "Document deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
