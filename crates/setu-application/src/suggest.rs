//! Debounced autocomplete driver.

use std::sync::Arc;

use setu_core::search::{Debouncer, InputAction};
use setu_core::terminology::TerminologyApi;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;

use crate::events::FlowEvent;

/// Drives the suggestion flow: every input change goes through the
/// sequence-tagged [`Debouncer`]; only the newest scheduled fetch runs and
/// only the newest dispatched response is applied.
///
/// Fetch failures are logged and otherwise swallowed; the previous
/// suggestion list stays on screen. The one exception is a rejected token,
/// which is reported so the session can be torn down.
pub struct SuggestionService {
    api: Arc<dyn TerminologyApi>,
    debouncer: Mutex<Debouncer>,
    events: UnboundedSender<FlowEvent>,
}

impl SuggestionService {
    pub fn new(api: Arc<dyn TerminologyApi>, events: UnboundedSender<FlowEvent>) -> Self {
        Self::with_debouncer(api, events, Debouncer::new())
    }

    /// Custom debounce timing, for tests.
    pub fn with_debouncer(
        api: Arc<dyn TerminologyApi>,
        events: UnboundedSender<FlowEvent>,
        debouncer: Debouncer,
    ) -> Self {
        Self {
            api,
            debouncer: Mutex::new(debouncer),
            events,
        }
    }

    /// Registers an input change. Returns immediately; results arrive as
    /// flow events after the debounce delay.
    pub async fn input_changed(self: &Arc<Self>, term: &str) {
        let mut debouncer = self.debouncer.lock().await;
        let delay = debouncer.delay();
        match debouncer.input_changed(term) {
            InputAction::Clear => {
                let _ = self.events.send(FlowEvent::SuggestionsCleared);
            }
            InputAction::Schedule(ticket) => {
                drop(debouncer);
                let service = Arc::clone(self);
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;

                    // Superseded while waiting? Then this fetch never runs.
                    if !service.debouncer.lock().await.try_dispatch(&ticket) {
                        return;
                    }

                    match service.api.autocomplete(&ticket.term).await {
                        Ok(results) => {
                            // A newer fetch may have dispatched while this
                            // one was in flight; stale results are dropped.
                            if service.debouncer.lock().await.should_apply(ticket.seq) {
                                let _ = service.events.send(FlowEvent::Suggestions(results));
                            }
                        }
                        Err(err) => {
                            if err.is_auth_failure() {
                                let _ = service.events.send(FlowEvent::SessionExpired);
                            }
                            // No user-visible error on this path; the
                            // previous list stays as-is.
                            tracing::warn!(%err, term = %ticket.term, "suggestion fetch failed");
                        }
                    }
                });
            }
        }
    }
}
