//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Enable development mode (relaxed CORS, ephemeral secret allowed).
    pub dev_mode: bool,

    /// JWT secret for HS256. REQUIRED when dev_mode is false.
    /// Supports `env:VAR_NAME` indirection.
    pub jwt_secret: Option<String>,

    /// Allowed CORS origins. If empty in production, CORS is disabled.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            dev_mode: false,
            // No default JWT secret - must be explicitly configured
            jwt_secret: None,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:8080".to_string(),
            ],
        }
    }
}

impl AuthConfig {
    /// Resolve the JWT secret, expanding `env:VAR_NAME` syntax.
    /// Returns the resolved secret or None if not configured.
    pub fn resolve_jwt_secret(&self) -> Result<Option<String>, ConfigValidationError> {
        match &self.jwt_secret {
            None => Ok(None),
            Some(value) => {
                if let Some(var_name) = value.strip_prefix("env:") {
                    match std::env::var(var_name) {
                        Ok(secret) if !secret.is_empty() => Ok(Some(secret)),
                        Ok(_) => Err(ConfigValidationError::EnvVarEmpty(var_name.to_string())),
                        Err(_) => Err(ConfigValidationError::EnvVarNotFound(var_name.to_string())),
                    }
                } else {
                    Ok(Some(value.clone()))
                }
            }
        }
    }

    /// Validate the configuration.
    /// Returns an error if the configuration is invalid for the current mode.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.dev_mode {
            // In production mode, JWT secret is required
            let secret = self.resolve_jwt_secret()?;

            match secret {
                None => return Err(ConfigValidationError::MissingJwtSecret),
                Some(ref secret) if secret.len() < 32 => {
                    return Err(ConfigValidationError::JwtSecretTooShort);
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Generate a secure random JWT secret using cryptographically secure RNG.
    pub fn generate_jwt_secret() -> String {
        use rand::Rng;

        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        const SECRET_LENGTH: usize = 64;

        let mut rng = rand::rng();
        (0..SECRET_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// JWT secret is required in production mode.
    MissingJwtSecret,
    /// JWT secret is too short (minimum 32 characters).
    JwtSecretTooShort,
    /// Environment variable not found (for `env:VAR_NAME` syntax).
    EnvVarNotFound(String),
    /// Environment variable is empty (for `env:VAR_NAME` syntax).
    EnvVarEmpty(String),
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingJwtSecret => {
                write!(
                    f,
                    "JWT secret is required when dev_mode is false. Set JOBTRACK__AUTH__JWT_SECRET or auth.jwt_secret in config."
                )
            }
            Self::JwtSecretTooShort => {
                write!(
                    f,
                    "JWT secret must be at least 32 characters long for security."
                )
            }
            Self::EnvVarNotFound(var) => {
                write!(
                    f,
                    "Environment variable '{}' not found (referenced via env:{} in config).",
                    var, var
                )
            }
            Self::EnvVarEmpty(var) => {
                write!(
                    f,
                    "Environment variable '{}' is empty (referenced via env:{} in config).",
                    var, var
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}
