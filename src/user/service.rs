//! Credential store business logic.

use anyhow::{Context, Result};
use tracing::{info, instrument};

use super::error::UserError;
use super::models::{RegisterRequest, User};
use super::repository::UserRepository;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 6;

/// Well-formed bcrypt hash used to equalize the cost of verifying
/// credentials for an email that does not exist.
const DUMMY_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

/// Service for user registration and credential verification.
#[derive(Debug, Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Create a new user service.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Register a new user.
    ///
    /// The raw password is hashed before it reaches the repository and is
    /// never logged.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> Result<User, UserError> {
        if request.name.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.is_empty()
        {
            return Err(UserError::Validation("All fields are required".to_string()));
        }

        if let Some(ref confirm) = request.confirm_password {
            if confirm != &request.password {
                return Err(UserError::Validation("Passwords do not match".to_string()));
            }
        }

        if request.password.len() < MIN_PASSWORD_LEN {
            return Err(UserError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        if !is_valid_email(&request.email) {
            return Err(UserError::Validation("Invalid email format".to_string()));
        }

        let password_hash = hash_password(&request.password)?;

        let user = self
            .repo
            .create(request.name.trim(), request.email.trim(), &password_hash)
            .await?;
        info!(user_id = %user.id, "Created new user");

        Ok(user)
    }

    /// Get a user by ID.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, UserError> {
        Ok(self.repo.get(id).await?)
    }

    /// Verify user credentials.
    ///
    /// Returns `None` for both an unknown email and a wrong password; the
    /// caller must surface the two identically. A dummy hash comparison runs
    /// on the unknown-email path so the observable cost matches.
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, UserError> {
        match self.repo.get_by_email(email).await? {
            Some(user) => {
                if verify_password(password, &user.password_hash)? {
                    Ok(Some(user))
                } else {
                    Ok(None)
                }
            }
            None => {
                let _ = verify_password(password, DUMMY_HASH);
                Ok(None)
            }
        }
    }
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    !parts[0].is_empty() && parts[1].contains('.')
}

/// Hash a password using bcrypt.
fn hash_password(password: &str) -> Result<String> {
    // Use a lower cost factor for development speed
    let cost = if cfg!(debug_assertions) { 4 } else { 10 };
    bcrypt::hash(password, cost).context("hashing password")
}

/// Verify a password against a bcrypt hash.
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash).context("verifying password")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup() -> UserService {
        let db = Database::in_memory().await.unwrap();
        UserService::new(UserRepository::new(db.pool().clone()))
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Ana".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: Some(password.to_string()),
        }
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name@sub.domain.com"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_password_hashing() {
        let hash = hash_password("secret1").unwrap();
        assert_ne!(hash, "secret1");
        assert!(verify_password("secret1", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_then_verify() {
        let service = setup().await;

        let user = service
            .register(register_request("a@x.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(user.email, "a@x.com");
        // Raw password is never stored
        assert_ne!(user.password_hash, "secret1");

        let verified = service.verify_credentials("a@x.com", "secret1").await.unwrap();
        assert_eq!(verified.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_verify_wrong_password_and_unknown_email_are_identical() {
        let service = setup().await;
        service
            .register(register_request("a@x.com", "secret1"))
            .await
            .unwrap();

        let wrong = service.verify_credentials("a@x.com", "nope").await.unwrap();
        let absent = service.verify_credentials("b@x.com", "nope").await.unwrap();
        assert!(wrong.is_none());
        assert!(absent.is_none());
    }

    #[tokio::test]
    async fn test_register_validation() {
        let service = setup().await;

        let mut missing = register_request("a@x.com", "secret1");
        missing.name = String::new();
        assert!(matches!(
            service.register(missing).await,
            Err(UserError::Validation(_))
        ));

        let short = register_request("a@x.com", "abc");
        assert!(matches!(
            service.register(short).await,
            Err(UserError::Validation(_))
        ));

        let mut mismatch = register_request("a@x.com", "secret1");
        mismatch.confirm_password = Some("secret2".to_string());
        assert!(matches!(
            service.register(mismatch).await,
            Err(UserError::Validation(_))
        ));

        let bad_email = register_request("not-an-email", "secret1");
        assert!(matches!(
            service.register(bad_email).await,
            Err(UserError::Validation(_))
        ));

        // Confirmation is optional
        let mut no_confirm = register_request("ok@x.com", "secret1");
        no_confirm.confirm_password = None;
        assert!(service.register(no_confirm).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = setup().await;

        service
            .register(register_request("dup@x.com", "secret1"))
            .await
            .unwrap();
        let err = service
            .register(register_request("dup@x.com", "other12"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::DuplicateEmail));
    }
}
