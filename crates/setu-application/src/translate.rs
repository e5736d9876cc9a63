//! Translation driver: selection → ranked candidates → concept pair.

use std::sync::Arc;

use setu_core::terminology::{CodedConcept, ConceptPair, IcdCandidate, TerminologyApi};
use tokio::sync::mpsc::UnboundedSender;

use crate::events::FlowEvent;

/// Turns a selected NAMASTE term into the two-slot translation result.
///
/// Unlike the suggestion flow, every failure here is visible: it collapses
/// to a placeholder pair rendered in place of real results.
pub struct TranslationService {
    api: Arc<dyn TerminologyApi>,
    events: UnboundedSender<FlowEvent>,
}

impl TranslationService {
    pub fn new(api: Arc<dyn TerminologyApi>, events: UnboundedSender<FlowEvent>) -> Self {
        Self { api, events }
    }

    /// Starts translation for a selected term. Emits `TranslationStarted`
    /// immediately and `TranslationReady` when the pair is known.
    pub fn select(self: &Arc<Self>, selected: CodedConcept) {
        let _ = self
            .events
            .send(FlowEvent::TranslationStarted(selected.clone()));
        let service = Arc::clone(self);
        tokio::spawn(async move {
            let pair = service.resolve(&selected).await;
            let _ = service.events.send(FlowEvent::TranslationReady(pair));
        });
    }

    /// Resolves the pair for a selected term. Never returns an error:
    /// failures become the visible `Error` placeholder pair.
    pub async fn resolve(&self, selected: &CodedConcept) -> ConceptPair {
        match self.api.translate(&selected.code, &selected.display).await {
            Ok(candidates) => self.pair_from(&candidates).await,
            Err(err) => {
                if err.is_auth_failure() {
                    let _ = self.events.send(FlowEvent::SessionExpired);
                }
                ConceptPair::error(err.to_string())
            }
        }
    }

    /// Applies the selection policy, resolving the top candidate through
    /// `/entity/{id}` when it carries a reference instead of a code.
    async fn pair_from(&self, candidates: &[IcdCandidate]) -> ConceptPair {
        let Some(top) = candidates.first() else {
            return ConceptPair::no_match();
        };
        if top.code.is_some() {
            return ConceptPair::from_candidates(candidates);
        }
        match top.id.as_deref() {
            Some(entity_id) => match self.api.entity(entity_id).await {
                // A resolved entity fills both slots uniformly.
                Ok(concept) => ConceptPair::uniform(concept),
                Err(err) => ConceptPair::error(err.to_string()),
            },
            None => ConceptPair::not_found(),
        }
    }
}
