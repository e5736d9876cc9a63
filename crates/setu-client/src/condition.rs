//! FHIR generation and bundle upload endpoints.

use async_trait::async_trait;
use serde_json::Value;
use setu_core::condition::{BundleReceipt, ConditionApi, ConditionRequest};
use setu_core::Result;

use crate::client::ApiClient;

#[async_trait]
impl ConditionApi for ApiClient {
    async fn generate_condition(&self, request: &ConditionRequest) -> Result<Value> {
        self.execute(self.post("/generate-fhir-condition").json(request))
            .await
    }

    async fn upload_bundle(&self, bundle: &Value) -> Result<BundleReceipt> {
        self.execute(self.post("/bundle-upload").json(bundle)).await
    }
}
