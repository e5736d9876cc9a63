//! Audit-log endpoint.

use async_trait::async_trait;
use setu_core::audit::{AuditApi, AuditEntry};
use setu_core::Result;

use crate::client::ApiClient;

#[async_trait]
impl AuditApi for ApiClient {
    async fn recent_logs(&self) -> Result<Vec<AuditEntry>> {
        self.execute(self.get("/logs")).await
    }
}
