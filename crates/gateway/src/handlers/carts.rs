//! Cart handlers
//!
//! Carts live in redis with a TTL; they never touch the relational
//! schema. Students assemble them anonymously at the terminal.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use folio_common::{
    cache::Cart,
    errors::{AppError, Result},
};

/// Request to create or replace a cart
#[derive(Debug, Deserialize, Validate)]
pub struct CartRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[serde(default)]
    pub document_ids: Vec<i32>,
}

/// A cart as returned by the API
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub id: Uuid,
    pub name: String,
    pub document_ids: Vec<i32>,
    pub created_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id,
            name: cart.name,
            document_ids: cart.document_ids,
            created_at: cart.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartListResponse {
    pub carts: Vec<CartResponse>,
}

/// List live carts
pub async fn list_carts(State(state): State<AppState>) -> Result<Json<CartListResponse>> {
    let carts = state.carts.list_carts().await?;

    Ok(Json(CartListResponse {
        carts: carts.into_iter().map(Into::into).collect(),
    }))
}

/// Create a new cart
pub async fn create_cart(
    State(state): State<AppState>,
    Json(request): Json<CartRequest>,
) -> Result<(StatusCode, Json<CartResponse>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let cart = state
        .carts
        .create_cart(request.name, request.document_ids)
        .await?;

    tracing::debug!(cart_id = %cart.id, "Cart created");

    Ok((StatusCode::CREATED, Json(cart.into())))
}

/// Get a cart
pub async fn get_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> Result<Json<CartResponse>> {
    let cart = state
        .carts
        .get_cart(cart_id)
        .await?
        .ok_or_else(|| AppError::CartNotFound {
            id: cart_id.to_string(),
        })?;

    Ok(Json(cart.into()))
}

/// Replace a cart's contents
pub async fn update_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(request): Json<CartRequest>,
) -> Result<Json<CartResponse>> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let cart = state
        .carts
        .update_cart(cart_id, request.name, request.document_ids)
        .await?;

    Ok(Json(cart.into()))
}

/// Drop a cart
pub async fn delete_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> Result<StatusCode> {
    if !state.carts.delete_cart(cart_id).await? {
        return Err(AppError::CartNotFound {
            id: cart_id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
