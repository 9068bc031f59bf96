use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Stage of an application in the pipeline.
///
/// Stored and serialized in canonical Title-Case; parsing is
/// case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Applied,
    Interviewing,
    Rejected,
    Offer,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interviewing => "Interviewing",
            JobStatus::Rejected => "Rejected",
            JobStatus::Offer => "Offer",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "applied" => Ok(JobStatus::Applied),
            "interviewing" => Ok(JobStatus::Interviewing),
            "rejected" => Ok(JobStatus::Rejected),
            "offer" => Ok(JobStatus::Offer),
            other => Err(format!("unknown job status: {other}")),
        }
    }
}

impl TryFrom<String> for JobStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A tracked job application, owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub user_id: String,
    pub company: String,
    pub title: String,
    #[sqlx(try_from = "String")]
    pub status: JobStatus,
    /// Date the application was submitted, as `YYYY-MM-DD`.
    pub application_date: String,
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Client payload for creating or updating a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub application_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!("applied".parse::<JobStatus>().unwrap(), JobStatus::Applied);
        assert_eq!("OFFER".parse::<JobStatus>().unwrap(), JobStatus::Offer);
        assert_eq!(
            " Interviewing ".parse::<JobStatus>().unwrap(),
            JobStatus::Interviewing
        );
        assert!("hired".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_status_display_is_canonical() {
        assert_eq!(JobStatus::Applied.to_string(), "Applied");
        assert_eq!(JobStatus::Rejected.to_string(), "Rejected");
        let parsed: JobStatus = "rejected".parse().unwrap();
        assert_eq!(parsed.to_string(), "Rejected");
    }
}
