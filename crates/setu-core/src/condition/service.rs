//! Condition capability trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::ConditionRequest;
use crate::error::Result;

/// One stored entry acknowledged by `/bundle-upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: String,
    pub patient_id: String,
}

/// Acknowledgment for an uploaded bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleReceipt {
    pub stored: Vec<StoredEntry>,
}

impl BundleReceipt {
    pub fn stored_count(&self) -> usize {
        self.stored.len()
    }
}

/// Capability for FHIR generation and bundle upload.
#[async_trait]
pub trait ConditionApi: Send + Sync {
    /// Generates a partial FHIR Condition document for a code pair. The
    /// caller stamps display metadata onto the result.
    async fn generate_condition(&self, request: &ConditionRequest) -> Result<Value>;

    /// Uploads a FHIR bundle parsed client-side from a local file.
    async fn upload_bundle(&self, bundle: &Value) -> Result<BundleReceipt>;
}
