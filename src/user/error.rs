//! Credential store errors.

use thiserror::Error;

/// Failures from user registration and credential verification.
#[derive(Debug, Error)]
pub enum UserError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// The email is already registered.
    #[error("Email already registered")]
    DuplicateEmail,

    /// Storage-layer failure. Details are logged, never sent to clients.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
