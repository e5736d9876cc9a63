//! Terminology capability trait.

use async_trait::async_trait;

use super::model::{CodedConcept, IcdCandidate, Suggestion};
use crate::error::Result;

/// Capability for the autocomplete, translation, and entity endpoints.
///
/// All three calls are bearer-authenticated. The suggestion and translation
/// flows each depend only on this trait, so they can be driven by an
/// in-process fake in tests.
#[async_trait]
pub trait TerminologyApi: Send + Sync {
    /// Fetches autocomplete suggestions for a partial term.
    async fn autocomplete(&self, term: &str) -> Result<Vec<Suggestion>>;

    /// Translates a NAMASTE code to ranked ICD-11 candidates.
    async fn translate(
        &self,
        namaste_code: &str,
        namaste_display: &str,
    ) -> Result<Vec<IcdCandidate>>;

    /// Resolves an entity reference to its canonical code/display pair.
    async fn entity(&self, entity_id: &str) -> Result<CodedConcept>;
}
