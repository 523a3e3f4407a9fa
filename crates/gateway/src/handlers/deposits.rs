//! Deposit handlers
//!
//! Cash deposits taken when documents are lent out. Navigation to
//! lectures is forward-only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::PageQuery;
use crate::AppState;
use folio_common::{
    auth::SessionUser,
    db::models::Deposit,
    errors::{AppError, Result},
    metrics,
};

/// Request to take a deposit
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepositRequest {
    /// Name of the person leaving the deposit
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    /// Amount in cents; defaults to the configured deposit price
    pub price: Option<i64>,

    #[serde(default)]
    pub lecture_ids: Vec<i32>,
}

/// A deposit as returned by the API
#[derive(Debug, Serialize)]
pub struct DepositResponse {
    pub id: i32,
    pub price: i64,
    pub name: String,
    pub by_user: String,
    pub date: String,
}

impl From<Deposit> for DepositResponse {
    fn from(deposit: Deposit) -> Self {
        Self {
            id: deposit.id,
            price: deposit.price,
            name: deposit.name,
            by_user: deposit.by_user,
            date: deposit.date.to_rfc3339(),
        }
    }
}

/// A deposit with the lectures it was taken for
#[derive(Debug, Serialize)]
pub struct DepositDetailResponse {
    #[serde(flatten)]
    pub deposit: DepositResponse,
    pub lectures: Vec<String>,
}

/// Page of deposits
#[derive(Debug, Serialize)]
pub struct DepositListResponse {
    pub deposits: Vec<DepositResponse>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// List deposits, newest first
pub async fn list_deposits(
    State(state): State<AppState>,
    _user: SessionUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<DepositListResponse>> {
    let (page, per_page) = query.clamped();
    let (deposits, total) = state.repo.list_deposits(page, per_page).await?;

    Ok(Json(DepositListResponse {
        deposits: deposits.into_iter().map(Into::into).collect(),
        total,
        page,
        per_page,
    }))
}

/// Take a deposit
pub async fn create_deposit(
    State(state): State<AppState>,
    user: SessionUser,
    Json(request): Json<CreateDepositRequest>,
) -> Result<(StatusCode, Json<DepositResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let price = request.price.unwrap_or_else(|| state.repo.deposit_price());

    let deposit = state
        .repo
        .create_deposit(price, request.name, user.username.clone(), request.lecture_ids)
        .await?;

    metrics::record_deposit_taken();

    tracing::info!(
        deposit_id = deposit.id,
        price = price,
        by = %user.username,
        "Deposit taken"
    );

    Ok((StatusCode::CREATED, Json(deposit.into())))
}

/// Get a deposit with its lectures
pub async fn get_deposit(
    State(state): State<AppState>,
    _user: SessionUser,
    Path(deposit_id): Path<i32>,
) -> Result<Json<DepositDetailResponse>> {
    let detail = state.repo.deposit_detail(deposit_id).await?;

    Ok(Json(DepositDetailResponse {
        deposit: detail.deposit.into(),
        lectures: detail.lectures.into_iter().map(|l| l.name).collect(),
    }))
}

/// Settle a deposit when the collateral is returned
pub async fn settle_deposit(
    State(state): State<AppState>,
    user: SessionUser,
    Path(deposit_id): Path<i32>,
) -> Result<StatusCode> {
    if !state.repo.settle_deposit(deposit_id).await? {
        return Err(AppError::DepositNotFound { id: deposit_id });
    }

    tracing::info!(deposit_id = deposit_id, by = %user.username, "Deposit settled");

    Ok(StatusCode::NO_CONTENT)
}
