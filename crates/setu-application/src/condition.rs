//! FHIR output, bundle upload, and audit-log retrieval.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use setu_core::audit::{AuditApi, AuditEntry};
use setu_core::condition::{ConditionApi, ConditionRequest, FhirRecord, DOWNLOAD_FILENAME};
use setu_core::terminology::{CodedConcept, ConceptPair};
use setu_core::Result;
use setu_infrastructure::read_bundle_file;

/// Record generation and the surrounding copy/download/upload actions.
pub struct ConditionService {
    api: Arc<dyn ConditionApi>,
    audit: Arc<dyn AuditApi>,
}

impl ConditionService {
    pub fn new(api: Arc<dyn ConditionApi>, audit: Arc<dyn AuditApi>) -> Self {
        Self { api, audit }
    }

    /// Generates and stamps a FHIR Condition record.
    ///
    /// A no-op (`Ok(None)`) unless a term is selected and the translation
    /// pair is real; placeholders carry nothing worth coding.
    pub async fn generate(
        &self,
        selected: Option<&CodedConcept>,
        pair: Option<&ConceptPair>,
    ) -> Result<Option<FhirRecord>> {
        let (Some(selected), Some(pair)) = (selected, pair) else {
            return Ok(None);
        };
        if pair.is_placeholder() {
            return Ok(None);
        }

        let request = ConditionRequest::from_selection(selected, pair);
        let document = self.api.generate_condition(&request).await?;
        Ok(Some(FhirRecord::stamped(document, Utc::now())))
    }

    /// Writes the record to `fhir_condition.json` in the given directory
    /// (the download action). Returns the written path.
    pub fn save_download(&self, record: &FhirRecord, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(DOWNLOAD_FILENAME);
        fs::write(&path, record.to_pretty_json()?)?;
        Ok(path)
    }

    /// Reads a local bundle file, uploads it, and returns the stored-entry
    /// count from the acknowledgment.
    pub async fn upload_bundle(&self, path: &Path) -> Result<usize> {
        let bundle = read_bundle_file(path)?;
        let receipt = self.api.upload_bundle(&bundle).await?;
        Ok(receipt.stored_count())
    }

    /// Fetches recent audit entries.
    pub async fn audit_logs(&self) -> Result<Vec<AuditEntry>> {
        self.audit.recent_logs().await
    }
}
