//! Session handlers
//!
//! Login checks the configured office accounts and sets a signed session
//! cookie; logout clears it. Account management itself lives outside this
//! system.

use axum::{
    extract::State,
    http::{header, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use folio_common::{
    auth::{self, SessionUser},
    errors::Result,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
}

/// Log in with a configured office account
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<([(header::HeaderName, String); 1], Json<UserResponse>)> {
    let user = auth::authenticate(&state.config.auth, &request.username, &request.password)?;

    let token = state.sessions.issue_token(&user.username)?;
    let cookie = state.sessions.session_cookie(&token);

    tracing::info!(username = %user.username, "Office login");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse {
            username: user.username,
        }),
    ))
}

/// Log out: the session cookie is cleared, the token simply expires
pub async fn logout(
    State(state): State<AppState>,
    user: SessionUser,
) -> Result<(StatusCode, [(header::HeaderName, String); 1])> {
    tracing::info!(username = %user.username, "Office logout");

    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, state.sessions.clear_cookie())],
    ))
}

/// Current session identity
pub async fn user(user: SessionUser) -> Json<UserResponse> {
    Json(UserResponse {
        username: user.username,
    })
}
