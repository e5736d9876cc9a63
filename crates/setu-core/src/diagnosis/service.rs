//! Diagnosis-job capability trait.

use async_trait::async_trait;

use super::model::{JobHandle, JobSnapshot};
use crate::error::Result;

/// Capability for the AI diagnosis job endpoints.
#[async_trait]
pub trait DiagnosisApi: Send + Sync {
    /// Submits symptom text and receives the job identifier with its
    /// initial status.
    async fn create_job(&self, symptoms: &str) -> Result<JobHandle>;

    /// Fetches the current status of a job by identifier.
    async fn job_status(&self, job_id: &str) -> Result<JobSnapshot>;
}
