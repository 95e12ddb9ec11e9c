//! Shared error type for domain operations.
//!
//! Model methods that enforce business rules return `DomainError` so the HTTP
//! layer can map each variant onto a status code. Plain lookups keep returning
//! `DbErr` and get wrapped at the boundary.

use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Login failed. Deliberately carries no detail about whether the
    /// username exists, the account is inactive, or the password is wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness rule was violated (duplicate username, duplicate
    /// attendance row that could not be resolved into an update).
    #[error("{0}")]
    ConstraintViolation(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] DbErr),

    /// Filesystem trouble while writing or reading a stored photo.
    #[error("Photo storage failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Best-effort detection of a unique-index violation surfaced through sqlx.
/// SeaORM does not expose a typed variant for this, so we match on the
/// driver's message.
pub fn is_unique_violation(err: &DbErr) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}
