//! Token issuance, verification, and the request authentication gate.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::claims::Claims;
use super::config::AuthConfig;
use super::error::AuthError;

/// Shared authentication state: resolved signing secret plus config.
#[derive(Clone)]
pub struct AuthState {
    inner: Arc<AuthStateInner>,
}

struct AuthStateInner {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthState {
    /// Create auth state from a validated configuration.
    ///
    /// In dev mode without a configured secret, an ephemeral secret is
    /// generated; tokens do not survive a restart in that case.
    pub fn new(config: AuthConfig) -> Result<Self, super::ConfigValidationError> {
        let secret = match config.resolve_jwt_secret()? {
            Some(secret) => secret,
            None => {
                tracing::warn!(
                    "No JWT secret configured; using an ephemeral secret (dev mode only)"
                );
                AuthConfig::generate_jwt_secret()
            }
        };

        Ok(Self {
            inner: Arc::new(AuthStateInner {
                encoding_key: EncodingKey::from_secret(secret.as_bytes()),
                decoding_key: DecodingKey::from_secret(secret.as_bytes()),
                config,
            }),
        })
    }

    /// Whether development mode is enabled.
    pub fn is_dev_mode(&self) -> bool {
        self.inner.config.dev_mode
    }

    /// Allowed CORS origins from configuration.
    pub fn allowed_origins(&self) -> &[String] {
        &self.inner.config.allowed_origins
    }

    /// Issue a signed token for a user, valid for 7 days.
    pub fn issue_token(&self, user_id: &str, email: &str) -> Result<String, AuthError> {
        let claims = Claims::new(user_id, email, chrono::Utc::now().timestamp());
        encode(&Header::default(), &claims, &self.inner.encoding_key)
            .map_err(|e| AuthError::Internal(format!("signing token: {}", e)))
    }

    /// Verify a token's signature and expiry. All-or-nothing.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.inner.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        Ok(data.claims)
    }
}

/// The verified identity of the caller, inserted by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub claims: Claims,
}

impl CurrentUser {
    /// The authenticated user's ID.
    pub fn id(&self) -> &str {
        &self.claims.sub
    }

    /// The authenticated user's email.
    pub fn email(&self) -> &str {
        &self.claims.email
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingAuthHeader)
    }
}

/// Authentication gate for protected routes.
///
/// Stateless per request: extracts the bearer token, verifies it, and
/// forwards the request with a [`CurrentUser`] extension. Any failure
/// short-circuits with a uniform 401.
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(&req)?;
    let claims = auth.verify_token(token)?;

    req.extensions_mut().insert(CurrentUser { claims });
    Ok(next.run(req).await)
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(req: &Request) -> Result<&str, AuthError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidAuthHeader)
}
