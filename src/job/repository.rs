use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use super::error::JobError;
use super::models::{Job, JobStatus};

/// Repository for job persistence.
///
/// Every read and write that targets a single row is scoped by owner:
/// the `WHERE id = ? AND user_id = ?` shape means a job belonging to
/// another user is indistinguishable from one that does not exist.
#[derive(Debug, Clone)]
pub struct JobRepository {
    pool: SqlitePool,
}

/// Fields accepted by [`JobRepository::create`] and [`JobRepository::update`],
/// validated and canonicalized by the service layer.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub company: String,
    pub title: String,
    pub status: JobStatus,
    pub application_date: String,
    pub notes: String,
}

impl JobRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn generate_id() -> String {
        format!("job_{}", nanoid::nanoid!(12))
    }

    /// Insert a new job owned by `user_id`.
    #[instrument(skip(self, record))]
    pub async fn create(&self, user_id: &str, record: JobRecord) -> Result<Job, JobError> {
        let id = Self::generate_id();
        let now = Utc::now().to_rfc3339();

        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (id, user_id, company, title, status, application_date, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&record.company)
        .bind(&record.title)
        .bind(record.status.as_str())
        .bind(&record.application_date)
        .bind(&record.notes)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .context("inserting job")?;

        Ok(job)
    }

    /// List jobs owned by `user_id`, most recently created first,
    /// optionally restricted to one status.
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: &str, status: Option<JobStatus>) -> Result<Vec<Job>, JobError> {
        let jobs = match status {
            Some(status) => {
                sqlx::query_as::<_, Job>(
                    "SELECT * FROM jobs WHERE user_id = ? AND status = ? ORDER BY created_at DESC",
                )
                .bind(user_id)
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Job>(
                    "SELECT * FROM jobs WHERE user_id = ? ORDER BY created_at DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .context("listing jobs")?;

        Ok(jobs)
    }

    /// Get a job by ID, only if owned by `user_id`.
    #[instrument(skip(self))]
    pub async fn get_owned(&self, user_id: &str, id: &str) -> Result<Option<Job>, JobError> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .context("fetching job")?;

        Ok(job)
    }

    /// Replace the mutable fields of a job owned by `user_id`.
    #[instrument(skip(self, record))]
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        record: JobRecord,
    ) -> Result<Job, JobError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET company = ?, title = ?, status = ?, application_date = ?, notes = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&record.company)
        .bind(&record.title)
        .bind(record.status.as_str())
        .bind(&record.application_date)
        .bind(&record.notes)
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("updating job")?;

        // The row can disappear between a prior read and this write
        if result.rows_affected() == 0 {
            return Err(JobError::NotFound);
        }

        self.get_owned(user_id, id)
            .await?
            .ok_or(JobError::NotFound)
    }

    /// Delete a job owned by `user_id`, returning it as it was.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: &str, id: &str) -> Result<Job, JobError> {
        let job = self
            .get_owned(user_id, id)
            .await?
            .ok_or(JobError::NotFound)?;

        let result = sqlx::query("DELETE FROM jobs WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("deleting job")?;

        if result.rows_affected() == 0 {
            return Err(JobError::NotFound);
        }

        Ok(job)
    }

    /// Count all jobs owned by `user_id`.
    #[instrument(skip(self))]
    pub async fn count(&self, user_id: &str) -> Result<i64, JobError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobs WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .context("counting jobs")?;

        Ok(count.0)
    }

    /// Remove all jobs. Test-only hook.
    #[cfg(any(test, feature = "integration-tests"))]
    pub async fn reset(&self) -> Result<(), JobError> {
        sqlx::query("DELETE FROM jobs")
            .execute(&self.pool)
            .await
            .context("resetting jobs")?;
        Ok(())
    }
}
