//! Examinant handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::documents::{document_page, DocumentFilterQuery, DocumentListResponse};
use crate::handlers::PageQuery;
use crate::AppState;
use folio_common::{
    auth::SessionUser,
    db::models::Examinant,
    errors::{AppError, Result},
};

/// Request to create a new examinant
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExaminantRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    /// Explicit by design: the schema has no default for this flag
    pub validated: bool,
}

/// An examinant as returned by the API
#[derive(Debug, Serialize)]
pub struct ExaminantResponse {
    pub id: i32,
    pub name: String,
    pub validated: bool,
}

impl From<Examinant> for ExaminantResponse {
    fn from(examinant: Examinant) -> Self {
        Self {
            id: examinant.id,
            name: examinant.name,
            validated: examinant.validated,
        }
    }
}

/// Page of examinants
#[derive(Debug, Serialize)]
pub struct ExaminantListResponse {
    pub examinants: Vec<ExaminantResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// List examinants
pub async fn list_examinants(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ExaminantListResponse>> {
    let (page, per_page) = query.clamped();
    let (examinants, total) = state.repo.list_examinants(page, per_page).await?;

    Ok(Json(ExaminantListResponse {
        examinants: examinants.into_iter().map(Into::into).collect(),
        total,
        page,
        per_page,
    }))
}

/// Create a new examinant
pub async fn create_examinant(
    State(state): State<AppState>,
    Json(request): Json<CreateExaminantRequest>,
) -> Result<(StatusCode, Json<ExaminantResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let examinant = state
        .repo
        .create_examinant(request.name, request.validated)
        .await?;

    tracing::info!(examinant_id = examinant.id, name = %examinant.name, "Examinant created");

    Ok((StatusCode::CREATED, Json(examinant.into())))
}

/// Delete an examinant; association rows cascade
pub async fn delete_examinant(
    State(state): State<AppState>,
    user: SessionUser,
    Path(examinant_id): Path<i32>,
) -> Result<StatusCode> {
    if !state.repo.delete_examinant(examinant_id).await? {
        return Err(AppError::ExaminantNotFound { id: examinant_id });
    }

    tracing::info!(examinant_id = examinant_id, by = %user.username, "Examinant deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Documents of an examinant, paginated
pub async fn documents_of_examinant(
    State(state): State<AppState>,
    Path(examinant_id): Path<i32>,
    Query(query): Query<DocumentFilterQuery>,
) -> Result<Json<DocumentListResponse>> {
    let (page, per_page) = query.clamped();
    let (documents, total) = state
        .repo
        .documents_of_examinant(examinant_id, query.document_type, page, per_page)
        .await?;

    Ok(Json(document_page(&state, documents, total, page, per_page)))
}
