//! Authentication errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Authentication failures.
///
/// Every variant surfaces to the client as the same generic 401 body; the
/// distinction exists only for logging. A caller must not be able to tell
/// "missing token" from "expired token" from "bad signature".
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingAuthHeader,

    #[error("malformed authorization header")]
    InvalidAuthHeader,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("authentication error: {0}")]
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Authentication rejected");

        let (status, message) = match self {
            AuthError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            // Uniform body for every token failure
            _ => (
                StatusCode::UNAUTHORIZED,
                "Invalid or missing authentication token".to_string(),
            ),
        };

        let code = if status == StatusCode::UNAUTHORIZED {
            "UNAUTHORIZED"
        } else {
            "INTERNAL_ERROR"
        };

        let body = serde_json::json!({ "error": message, "code": code });
        (status, Json(body)).into_response()
    }
}
