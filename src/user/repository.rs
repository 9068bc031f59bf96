//! User repository for database operations.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::error::UserError;
use super::models::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Generate a new user ID.
    fn generate_id() -> String {
        format!("usr_{}", nanoid::nanoid!(12))
    }

    /// Create a new user from an already-hashed password.
    ///
    /// Email uniqueness rides on the table's UNIQUE constraint, so the
    /// check-and-insert is a single atomic statement. A unique violation
    /// maps to [`UserError::DuplicateEmail`].
    #[instrument(skip(self, password_hash))]
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, UserError> {
        let id = Self::generate_id();

        debug!("Creating user: {} ({})", email, id);

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(UserError::DuplicateEmail),
            Err(e) => {
                return Err(UserError::Internal(
                    anyhow::Error::new(e).context("inserting user"),
                ));
            }
        }

        let user = self
            .get(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("user not found after creation"))?;

        Ok(user)
    }

    /// Get a user by ID.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("fetching user")?;

        Ok(user)
    }

    /// Get a user by email.
    #[instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("fetching user by email")?;

        Ok(user)
    }

    /// Delete a user. Owned jobs are removed by the FK cascade.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("deleting user")?;

        if result.rows_affected() == 0 {
            return Err(anyhow::anyhow!("user not found: {}", id));
        }

        Ok(())
    }

    /// Count total users.
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .context("counting users")?;

        Ok(count.0)
    }

    /// Remove all users. Available only to the test harness.
    #[cfg(any(test, feature = "integration-tests"))]
    pub async fn reset(&self) -> Result<()> {
        sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await
            .context("resetting users table")?;
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
