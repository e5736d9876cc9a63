//! Audit-log capability trait.

use async_trait::async_trait;

use super::model::AuditEntry;
use crate::error::Result;

/// Capability for the audit-log endpoint.
#[async_trait]
pub trait AuditApi: Send + Sync {
    /// Fetches recent audit entries, newest first.
    async fn recent_logs(&self) -> Result<Vec<AuditEntry>>;
}
