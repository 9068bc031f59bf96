//! User data models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user.
///
/// Immutable after creation: there is no profile update or self-service
/// delete path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user ID (e.g., "usr_V1StGXR8_Z5j").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email, unique and case-sensitive.
    pub email: String,
    /// Bcrypt password hash. Never leaves the credential store.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user registered.
    pub created_at: String,
}

/// Registration request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Optional confirmation; when present it must match `password`.
    #[serde(default)]
    pub confirm_password: Option<String>,
}

/// Login request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
