//! Domain-level errors.
//!
//! Rule violations detected before any storage is touched. They carry no
//! HTTP or database detail; `common::AppError` decides how they surface.

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input that cannot name or describe a user
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
