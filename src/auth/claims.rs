//! JWT claims.

use serde::{Deserialize, Serialize};

/// Token lifetime: 7 days from issuance.
pub const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// JWT claims structure.
///
/// Self-contained identity claim; the server keeps no session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,

    /// User's email.
    pub email: String,

    /// Issued at (as Unix timestamp).
    pub iat: i64,

    /// Expiration time (as Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user, expiring [`TOKEN_TTL_SECS`] after `issued_at`.
    pub fn new(user_id: &str, email: &str, issued_at: i64) -> Self {
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        }
    }
}
