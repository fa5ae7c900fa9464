//! # AppError
//!
//! Centralized error handling for the newsroom core.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Sign-in/sign-up rejected by the identity provider
    /// (bad credentials, weak password, email already in use)
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The caller's role or ownership does not satisfy the action's policy
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Local check failed before any backend call was issued
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Referenced entity absent (e.g. Article, Category, UserProfile)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Infrastructure failure (store unreachable, malformed record)
    #[error("backend failure: {0}")]
    Backend(String),
}

/// A specialized Result type for newsroom logic.
pub type Result<T> = std::result::Result<T, AppError>;
