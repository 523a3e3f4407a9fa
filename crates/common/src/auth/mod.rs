//! Office session utilities
//!
//! Provides:
//! - Password digest checks against configured office accounts
//! - Signed session tokens for the login/logout/user routes
//! - Session extraction for handlers
//!
//! Deliberately thin: account management lives outside this system, the
//! configuration only names who may log in.

use crate::config::AuthConfig;
use crate::errors::{AppError, Result};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// The authenticated office member available to handlers
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub username: String,
}

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (office account username)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Session token manager
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
    cookie_name: String,
}

impl SessionManager {
    /// Create a session manager from configuration. A missing secret is
    /// replaced by a random one, which invalidates sessions on restart.
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = config
            .session_secret
            .clone()
            .unwrap_or_else(generate_session_secret);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: config.session_ttl_secs as i64,
            cookie_name: config.cookie_name.clone(),
        }
    }

    /// Issue a session token for an office account
    pub fn issue_token(&self, username: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_secs);

        let claims = SessionClaims {
            sub: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| AppError::Internal {
            message: format!("Failed to issue session token: {}", e),
        })
    }

    /// Validate and decode a session token
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::ExpiredSession,
                _ => AppError::Unauthorized {
                    message: "Invalid session token".to_string(),
                },
            })
    }

    /// Set-Cookie value carrying a session token
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            self.cookie_name, token, self.ttl_secs
        )
    }

    /// Set-Cookie value that clears the session
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
            self.cookie_name
        )
    }

    fn token_from_parts(&self, parts: &Parts) -> Option<String> {
        // Bearer token takes precedence, cookie is the browser path
        if let Some(auth_header) = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
        {
            if let Some(token) = extract_bearer(auth_header) {
                return Some(token.to_string());
            }
        }

        parts
            .headers
            .get("cookie")
            .and_then(|v| v.to_str().ok())
            .and_then(|cookies| extract_cookie(cookies, &self.cookie_name))
            .map(String::from)
    }
}

/// Check a password against the configured office accounts
pub fn authenticate(config: &AuthConfig, username: &str, password: &str) -> Result<SessionUser> {
    let account = config
        .accounts
        .iter()
        .find(|account| account.username == username)
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(password, &account.password_sha256) {
        return Err(AppError::InvalidCredentials);
    }

    Ok(SessionUser {
        username: account.username.clone(),
    })
}

/// Hash a password for storage
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Validate a password against a stored hash
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

/// Generate a random session-signing secret
pub fn generate_session_secret() -> String {
    let random_bytes: [u8; 32] = rand::random();
    hex::encode(random_bytes)
}

/// Extract a bearer token from an Authorization header
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Extract a named cookie value from a Cookie header
pub fn extract_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
}

/// Axum extractor for SessionUser
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    Arc<SessionManager>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let sessions = Arc::<SessionManager>::from_ref(state);

        let token = sessions
            .token_from_parts(parts)
            .ok_or_else(|| AppError::Unauthorized {
                message: "Missing session token".to_string(),
            })?;

        let claims = sessions.validate_token(&token)?;

        Ok(SessionUser {
            username: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccountConfig;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            session_secret: Some("test_secret".to_string()),
            session_ttl_secs: 3600,
            cookie_name: "folio_session".to_string(),
            accounts: vec![AccountConfig {
                username: "kasse".to_string(),
                password_sha256: hash_password("hunter2"),
            }],
        }
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("hunter2");
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_authenticate_known_account() {
        let config = auth_config();
        let user = authenticate(&config, "kasse", "hunter2").unwrap();
        assert_eq!(user.username, "kasse");

        assert!(matches!(
            authenticate(&config, "kasse", "wrong"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate(&config, "nobody", "hunter2"),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_token_roundtrip() {
        let sessions = SessionManager::from_config(&auth_config());
        let token = sessions.issue_token("kasse").unwrap();
        let claims = sessions.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "kasse");
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let sessions = SessionManager::from_config(&auth_config());
        assert!(sessions.validate_token("not-a-token").is_err());
    }

    #[test]
    fn test_extract_cookie() {
        let cookies = "theme=dark; folio_session=abc.def.ghi; other=1";
        assert_eq!(extract_cookie(cookies, "folio_session"), Some("abc.def.ghi"));
        assert_eq!(extract_cookie(cookies, "missing"), None);
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer("Basic abc"), None);
    }
}
