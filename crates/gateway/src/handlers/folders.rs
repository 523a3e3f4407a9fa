//! Folder handlers
//!
//! Folders are office-managed; the location comes from the inventory
//! module and is loaded eagerly with every folder read.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::examinants::ExaminantResponse;
use crate::handlers::lectures::LectureResponse;
use crate::AppState;
use folio_common::{
    auth::SessionUser,
    db::models::{DocumentType, Folder, Location},
    errors::{AppError, Result},
};

/// Request to create a new folder
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFolderRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    pub document_type: DocumentType,

    /// Required: every folder is shelved somewhere
    pub location_id: i32,

    #[serde(default)]
    pub lecture_ids: Vec<i32>,

    #[serde(default)]
    pub examinant_ids: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub id: i32,
    pub name: String,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            name: location.name,
        }
    }
}

/// A folder as returned by the API
#[derive(Debug, Serialize)]
pub struct FolderResponse {
    pub id: i32,
    pub name: String,
    pub document_type: DocumentType,
    pub location: LocationResponse,
}

/// A folder with its eagerly loaded relationships
#[derive(Debug, Serialize)]
pub struct FolderDetailResponse {
    #[serde(flatten)]
    pub folder: FolderResponse,
    pub lectures: Vec<LectureResponse>,
    pub examinants: Vec<ExaminantResponse>,
}

#[derive(Debug, Serialize)]
pub struct FolderListResponse {
    pub folders: Vec<FolderResponse>,
}

fn folder_response(folder: Folder, location: Option<Location>) -> Result<FolderResponse> {
    // location_id is NOT NULL with an enforced foreign key
    let location = location.ok_or_else(|| AppError::Internal {
        message: format!("folder {} has no location row", folder.id),
    })?;

    Ok(FolderResponse {
        id: folder.id,
        name: folder.name,
        document_type: folder.document_type,
        location: location.into(),
    })
}

/// List folders with their locations
pub async fn list_folders(State(state): State<AppState>) -> Result<Json<FolderListResponse>> {
    let folders = state
        .repo
        .list_folders()
        .await?
        .into_iter()
        .map(|(folder, location)| folder_response(folder, location))
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(FolderListResponse { folders }))
}

/// Create a new folder
pub async fn create_folder(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<FolderDetailResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let folder = state
        .repo
        .create_folder(folio_common::db::NewFolder {
            name: request.name,
            document_type: request.document_type,
            location_id: request.location_id,
            lecture_ids: request.lecture_ids,
            examinant_ids: request.examinant_ids,
        })
        .await?;

    tracing::info!(folder_id = folder.id, by = %user.username, "Folder created");

    let detail = state.repo.folder_detail(folder.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(FolderDetailResponse {
            folder: folder_response(detail.folder, Some(detail.location))?,
            lectures: detail.lectures.into_iter().map(Into::into).collect(),
            examinants: detail.examinants.into_iter().map(Into::into).collect(),
        }),
    ))
}

/// Get a folder with location, lectures, and examinants
pub async fn get_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<i32>,
) -> Result<Json<FolderDetailResponse>> {
    let detail = state.repo.folder_detail(folder_id).await?;

    Ok(Json(FolderDetailResponse {
        folder: folder_response(detail.folder, Some(detail.location))?,
        lectures: detail.lectures.into_iter().map(Into::into).collect(),
        examinants: detail.examinants.into_iter().map(Into::into).collect(),
    }))
}

/// Delete a folder; association rows cascade, the location stays
pub async fn delete_folder(
    State(state): State<AppState>,
    user: SessionUser,
    Path(folder_id): Path<i32>,
) -> Result<StatusCode> {
    if !state.repo.delete_folder(folder_id).await? {
        return Err(AppError::FolderNotFound { id: folder_id });
    }

    tracing::info!(folder_id = folder_id, by = %user.username, "Folder deleted");

    Ok(StatusCode::NO_CONTENT)
}
