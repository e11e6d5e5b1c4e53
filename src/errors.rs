// ABOUTME: Unified error handling for the repkit engine
// ABOUTME: Defines the AppError taxonomy and the AppResult alias used across modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Unified Error Handling
//!
//! The engine surfaces a small, fixed taxonomy to callers:
//!
//! - [`AppError::NotFound`] — a profile, plan, or workout the operation needs
//!   is absent; surfaced with a human-readable message, never retried here.
//! - [`AppError::Validation`] — malformed input rejected before any mutation.
//! - [`AppError::AlreadyExists`] — the target resource is already present.
//!   The weekly adjuster treats this as an idempotent success, not a failure.
//! - [`AppError::Database`] — the storage collaborator failed.
//!
//! Calling layers decide HTTP status mapping; nothing in this crate knows
//! about HTTP.

use thiserror::Error;

/// Convenient result alias used by every fallible API in the crate
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error taxonomy
#[derive(Debug, Error)]
pub enum AppError {
    /// A required resource (profile, plan, workout) was not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Input failed validation before any mutation took place
    #[error("validation failed: {0}")]
    Validation(String),

    /// The resource already exists; callers may treat this as success
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Underlying storage failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored JSON column failed to (de)serialize
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Catch-all for unexpected internal failures
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a `NotFound` error from any displayable context
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Build a `Validation` error from any displayable context
    pub fn validation(why: impl Into<String>) -> Self {
        Self::Validation(why.into())
    }

    /// Build an `AlreadyExists` error from any displayable context
    pub fn already_exists(what: impl Into<String>) -> Self {
        Self::AlreadyExists(what.into())
    }

    /// Build an `Internal` error from any displayable context
    pub fn internal(why: impl Into<String>) -> Self {
        Self::Internal(why.into())
    }

    /// True when the error represents the idempotent "already present" case
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }
}
