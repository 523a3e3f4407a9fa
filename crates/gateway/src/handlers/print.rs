//! Printing handlers
//!
//! Submits jobs to the external print service and records what ended up
//! printed in which folder. Failures surface to the caller; nothing is
//! retried.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use folio_common::{
    auth::SessionUser,
    errors::{AppError, Result},
    metrics,
    printing::PrintJob,
};

/// Request to print a set of documents
#[derive(Debug, Deserialize, Validate)]
pub struct PrintRequest {
    #[validate(length(min = 1))]
    pub document_ids: Vec<i32>,

    /// Printer queue; defaults to the first configured one
    pub printer: Option<String>,

    #[serde(default)]
    pub cover_text: String,

    /// Folder the printed copies are filed into, if any
    pub folder_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct PrintResponse {
    pub job_id: String,
    pub documents: usize,
    pub pages: i32,
    /// Total price of the printed copies in cents
    pub price: i64,
}

/// Request to record misprinted pages
#[derive(Debug, Deserialize, Validate)]
pub struct ErroneousCopiesRequest {
    #[validate(range(min = 1))]
    pub pages: i32,

    pub printer: Option<String>,

    #[serde(default)]
    pub comment: String,
}

/// Submit a print job for a set of documents
pub async fn print_job(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<PrintRequest>,
) -> Result<(StatusCode, Json<PrintResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let documents = state.repo.find_documents_by_ids(&request.document_ids).await?;

    // Every requested document must exist
    for &id in &request.document_ids {
        if !documents.iter().any(|d| d.id == id) {
            return Err(AppError::DocumentNotFound { id });
        }
    }

    let printer = match request.printer {
        Some(printer) => {
            let known = &state.config.printing.printers;
            if !known.is_empty() && !known.contains(&printer) {
                return Err(AppError::Validation {
                    message: format!("Unknown printer: {}", printer),
                    field: Some("printer".to_string()),
                });
            }
            printer
        }
        None => state
            .config
            .printing
            .printers
            .first()
            .cloned()
            .ok_or_else(|| AppError::Configuration {
                message: "No printers configured".to_string(),
            })?,
    };

    let pages: i32 = documents.iter().map(|d| d.number_of_pages).sum();
    let price: i64 = documents.iter().map(|d| state.repo.document_price(d)).sum();

    let receipt = state
        .printer
        .submit(&PrintJob {
            printer: printer.clone(),
            cover_text: request.cover_text,
            document_ids: request.document_ids.clone(),
            total_pages: pages,
            submitted_by: user.username.clone(),
        })
        .await?;

    // File the copies into their folder once the service accepted the job
    if let Some(folder_id) = request.folder_id {
        state
            .repo
            .record_printed_docs(folder_id, &request.document_ids)
            .await?;
    }

    metrics::record_print_job(&printer, pages.max(0) as u64);

    tracing::info!(
        job_id = %receipt.job_id,
        printer = %printer,
        documents = request.document_ids.len(),
        pages = pages,
        by = %user.username,
        "Print job submitted"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(PrintResponse {
            job_id: receipt.job_id,
            documents: request.document_ids.len(),
            pages,
            price,
        }),
    ))
}

/// Record misprinted pages for accounting
pub async fn log_erroneous_copies(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<ErroneousCopiesRequest>,
) -> Result<StatusCode> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let printer = request.printer.unwrap_or_else(|| {
        state
            .config
            .printing
            .printers
            .first()
            .cloned()
            .unwrap_or_default()
    });

    metrics::record_erroneous_copies(request.pages as u64);

    tracing::warn!(
        pages = request.pages,
        printer = %printer,
        comment = %request.comment,
        by = %user.username,
        "Erroneous copies recorded"
    );

    Ok(StatusCode::NO_CONTENT)
}
