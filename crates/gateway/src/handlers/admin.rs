//! Administrative overview
//!
//! Delegation point for the admin surface. Serves a read-only snapshot of
//! the archive; anything heavier belongs to an external admin console.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use folio_common::{auth::SessionUser, db::ArchiveCounts, errors::Result};

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub version: &'static str,
    pub counts: ArchiveCounts,
}

/// Entity counts across the documents schema
pub async fn overview(
    State(state): State<AppState>,
    _user: SessionUser,
) -> Result<Json<OverviewResponse>> {
    let counts = state.repo.entity_counts().await?;

    Ok(Json(OverviewResponse {
        version: folio_common::VERSION,
        counts,
    }))
}
