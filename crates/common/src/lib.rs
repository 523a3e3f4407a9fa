//! Folio Common Library
//!
//! Shared code for the folio services including:
//! - Database models and repository patterns
//! - Error types and handling
//! - Configuration management
//! - Authentication utilities
//! - Redis-backed cart cache
//! - Print service client
//! - Metrics and observability

pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod printing;

/// Application version, sourced from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
