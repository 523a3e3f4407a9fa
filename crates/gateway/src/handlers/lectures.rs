//! Lecture handlers

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
    db::models::Lecture,
    errors::{AppError, Result},
};

/// Request to create a new lecture
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLectureRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub comment: String,

    /// Explicit by design: the schema has no default for this flag
    pub validated: bool,
}

/// A lecture as returned by the API
#[derive(Debug, Serialize)]
pub struct LectureResponse {
    pub id: i32,
    pub name: String,
    pub aliases: Vec<String>,
    pub comment: String,
    pub validated: bool,
}

impl From<Lecture> for LectureResponse {
    fn from(lecture: Lecture) -> Self {
        Self {
            id: lecture.id,
            name: lecture.name,
            aliases: lecture.aliases,
            comment: lecture.comment,
            validated: lecture.validated,
        }
    }
}

/// Page of lectures
#[derive(Debug, Serialize)]
pub struct LectureListResponse {
    pub lectures: Vec<LectureResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// List lectures
pub async fn list_lectures(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<LectureListResponse>> {
    let (page, per_page) = query.clamped();
    let (lectures, total) = state.repo.list_lectures(page, per_page).await?;

    Ok(Json(LectureListResponse {
        lectures: lectures.into_iter().map(Into::into).collect(),
        total,
        page,
        per_page,
    }))
}

/// Create a new lecture
pub async fn create_lecture(
    State(state): State<AppState>,
    Json(request): Json<CreateLectureRequest>,
) -> Result<(StatusCode, Json<LectureResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let lecture = state
        .repo
        .create_lecture(
            request.name,
            request.aliases,
            request.comment,
            request.validated,
        )
        .await?;

    tracing::info!(lecture_id = lecture.id, name = %lecture.name, "Lecture created");

    Ok((StatusCode::CREATED, Json(lecture.into())))
}

/// Delete a lecture. Its association rows cascade; documents and folders
/// on the other side stay.
pub async fn delete_lecture(
    State(state): State<AppState>,
    user: SessionUser,
    Path(lecture_id): Path<i32>,
) -> Result<StatusCode> {
    if !state.repo.delete_lecture(lecture_id).await? {
        return Err(AppError::LectureNotFound { id: lecture_id });
    }

    tracing::info!(lecture_id = lecture_id, by = %user.username, "Lecture deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Documents of a lecture, paginated. An existing lecture without
/// documents yields an empty page; a missing lecture yields a 404.
pub async fn documents_of_lecture(
    State(state): State<AppState>,
    Path(lecture_id): Path<i32>,
    Query(query): Query<DocumentFilterQuery>,
) -> Result<Json<DocumentListResponse>> {
    let (page, per_page) = query.clamped();
    let (documents, total) = state
        .repo
        .documents_of_lecture(lecture_id, query.document_type, page, per_page)
        .await?;

    Ok(Json(document_page(&state, documents, total, page, per_page)))
}
