//! Job applications: models, persistence, ownership-scoped operations.

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::JobError;
pub use models::{Job, JobPayload, JobStatus};
pub use repository::{JobRecord, JobRepository};
pub use service::JobService;
