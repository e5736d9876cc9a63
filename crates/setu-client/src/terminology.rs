//! Autocomplete, translation, and entity endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use setu_core::terminology::{CodedConcept, IcdCandidate, Suggestion, TerminologyApi};
use setu_core::Result;

use crate::client::ApiClient;

#[derive(Deserialize)]
struct AutocompleteResponse {
    results: Vec<Suggestion>,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    namaste_code: &'a str,
    namaste_display: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    candidates: Vec<IcdCandidate>,
}

#[async_trait]
impl TerminologyApi for ApiClient {
    async fn autocomplete(&self, term: &str) -> Result<Vec<Suggestion>> {
        let response: AutocompleteResponse = self
            .execute(self.get("/autocomplete-namaste").query(&[("term", term)]))
            .await?;
        Ok(response.results)
    }

    async fn translate(
        &self,
        namaste_code: &str,
        namaste_display: &str,
    ) -> Result<Vec<IcdCandidate>> {
        let request = TranslateRequest {
            namaste_code,
            namaste_display,
        };
        let response: TranslateResponse = self
            .execute(self.post("/translate/namaste-to-icd").json(&request))
            .await?;
        Ok(response.candidates)
    }

    async fn entity(&self, entity_id: &str) -> Result<CodedConcept> {
        self.execute(self.get(&format!("/entity/{entity_id}"))).await
    }
}
