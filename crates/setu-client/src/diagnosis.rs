//! AI diagnosis job endpoints.

use async_trait::async_trait;
use serde::Serialize;
use setu_core::diagnosis::{DiagnosisApi, JobHandle, JobSnapshot};
use setu_core::Result;

use crate::client::ApiClient;

#[derive(Serialize)]
struct CreateJobRequest<'a> {
    symptoms: &'a str,
}

#[async_trait]
impl DiagnosisApi for ApiClient {
    async fn create_job(&self, symptoms: &str) -> Result<JobHandle> {
        self.execute(
            self.post("/create-namaste-job")
                .json(&CreateJobRequest { symptoms }),
        )
        .await
    }

    async fn job_status(&self, job_id: &str) -> Result<JobSnapshot> {
        self.execute(self.get(&format!("/namaste-job/{job_id}"))).await
    }
}
