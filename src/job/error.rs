use thiserror::Error;

/// Errors from job operations.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Job not found")]
    NotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
