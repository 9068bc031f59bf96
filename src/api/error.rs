use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::job::JobError;
use crate::user::UserError;

/// API-level errors mapped to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The real cause stays in the logs; clients get a generic message
        let message = if let ApiError::Internal(ref detail) = self {
            tracing::error!("Internal error: {detail}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: message,
            code: self.code().to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) => ApiError::BadRequest(msg),
            UserError::DuplicateEmail => ApiError::Conflict(err.to_string()),
            UserError::Internal(e) => ApiError::Internal(format!("{e:#}")),
        }
    }
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::Validation(msg) => ApiError::BadRequest(msg),
            JobError::InvalidStatus(_) => ApiError::BadRequest(err.to_string()),
            JobError::NotFound => ApiError::NotFound(err.to_string()),
            JobError::Internal(e) => ApiError::Internal(format!("{e:#}")),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::Internal(detail) => ApiError::Internal(detail),
            // Everything token-related collapses to one message
            _ => ApiError::Unauthorized("Invalid or missing authentication token".to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(format!("{err:#}"))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(UserError::DuplicateEmail).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(JobError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(JobError::InvalidStatus("hired".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_token_errors_share_one_message() {
        let missing = ApiError::from(AuthError::MissingAuthHeader);
        let expired = ApiError::from(AuthError::TokenExpired);
        assert_eq!(missing.to_string(), expired.to_string());
    }
}
