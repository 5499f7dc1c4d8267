// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// `Store`, `NotFound` and `Integrity` are the three failure kinds callers
/// are expected to tell apart; the rest cover configuration and domain rules.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    /// The persistence layer failed (I/O, connectivity, constraint violation)
    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation referenced a job id that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A stored invariant was observed violated (e.g. two rows sharing one id)
    #[error("Integrity violation: {0}")]
    Integrity(String),
}

impl AppError {
    pub fn job_not_found(id: crate::domain::JobId) -> Self {
        AppError::NotFound(format!("Job {} not found", id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by converting to AppError::Store(String)
