//! Error types for the pricing service.

use exchange_rates::RateError;
use rust_decimal::Decimal;

/// Domain-level errors (business rule violations).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("{field} cannot be negative, got {value}")]
    NegativeAmount { field: String, value: Decimal },

    #[error("Cost parameter {field} cannot be negative, got {value}")]
    NegativeParameter { field: &'static str, value: Decimal },

    #[error(transparent)]
    Rate(#[from] RateError),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Malformed data: {0}")]
    Parse(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for the CLI and any other edge).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Parse(e) => AppError::BadRequest(e),
            RepoError::Conflict(e) => AppError::BadRequest(e),
            RepoError::Io(e) => AppError::Internal(e),
        }
    }
}
