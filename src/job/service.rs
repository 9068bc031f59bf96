//! Job business logic: validation, canonicalization, ownership threading.

use chrono::Utc;
use tracing::{info, instrument};

use super::error::JobError;
use super::models::{Job, JobPayload, JobStatus};
use super::repository::{JobRecord, JobRepository};

/// Service for managing job applications on behalf of an authenticated user.
///
/// Every method takes the acting user's ID; the repository never sees a
/// query that is not scoped to it.
#[derive(Debug, Clone)]
pub struct JobService {
    repo: JobRepository,
}

impl JobService {
    pub fn new(repo: JobRepository) -> Self {
        Self { repo }
    }

    /// Create a job for `user_id`.
    ///
    /// `applicationDate` defaults to today when omitted.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, user_id: &str, payload: JobPayload) -> Result<Job, JobError> {
        let record = validate_payload(&payload, || today())?;

        let job = self.repo.create(user_id, record).await?;
        info!(job_id = %job.id, "Created job");

        Ok(job)
    }

    /// List jobs for `user_id`, newest first.
    ///
    /// An empty or `all` filter means no filter; a filter that does not
    /// name a known status matches nothing.
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: &str, status: Option<&str>) -> Result<Vec<Job>, JobError> {
        let filter = match status.map(str::trim) {
            None | Some("") => None,
            Some(s) if s.eq_ignore_ascii_case("all") => None,
            Some(s) => match s.parse::<JobStatus>() {
                Ok(status) => Some(status),
                Err(_) => return Ok(Vec::new()),
            },
        };

        self.repo.list(user_id, filter).await
    }

    /// Get a single job owned by `user_id`.
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: &str, id: &str) -> Result<Job, JobError> {
        self.repo
            .get_owned(user_id, id)
            .await?
            .ok_or(JobError::NotFound)
    }

    /// Replace a job owned by `user_id`.
    ///
    /// When `applicationDate` is omitted the stored date is kept.
    #[instrument(skip(self, payload))]
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        payload: JobPayload,
    ) -> Result<Job, JobError> {
        let existing = self.get(user_id, id).await?;

        let record = validate_payload(&payload, || existing.application_date.clone())?;

        self.repo.update(user_id, id, record).await
    }

    /// Delete a job owned by `user_id`, returning the removed row.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: &str, id: &str) -> Result<Job, JobError> {
        let job = self.repo.delete(user_id, id).await?;
        info!(job_id = %job.id, "Deleted job");
        Ok(job)
    }
}

/// Current date as `YYYY-MM-DD`.
fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Check required fields and canonicalize the payload into a record.
///
/// `default_date` supplies the application date when the payload omits it.
fn validate_payload(
    payload: &JobPayload,
    default_date: impl FnOnce() -> String,
) -> Result<JobRecord, JobError> {
    let company = payload.company.trim();
    let title = payload.title.trim();
    let status = payload.status.trim();

    if company.is_empty() || title.is_empty() || status.is_empty() {
        return Err(JobError::Validation(
            "Company, title and status are required".to_string(),
        ));
    }

    let status: JobStatus = status
        .parse()
        .map_err(|_| JobError::InvalidStatus(payload.status.trim().to_string()))?;

    let application_date = match payload.application_date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => default_date(),
    };

    Ok(JobRecord {
        company: company.to_string(),
        title: title.to_string(),
        status,
        application_date,
        notes: payload
            .notes
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    })
}
