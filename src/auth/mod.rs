//! Authentication module.
//!
//! Provides stateless JWT issuance and verification plus the request
//! authentication gate for protected routes.

mod claims;
mod config;
mod error;
mod middleware;

pub use claims::{Claims, TOKEN_TTL_SECS};
pub use config::{AuthConfig, ConfigValidationError};
pub use error::AuthError;
pub use middleware::{AuthState, CurrentUser, auth_middleware};
