//! View state for the authenticated workbench.

use setu_core::condition::FhirRecord;
use setu_core::diagnosis::{DiagnosisSuggestion, JobStatus};
use setu_core::terminology::{CodedConcept, ConceptPair, Suggestion};

use crate::events::FlowEvent;

/// All transient view state owned by the authenticated view.
///
/// Everything here is replaced by flow events or cleared on logout; nothing
/// is persisted. The frontend is the single writer: it folds events in via
/// [`Workbench::apply`] and mutates directly for synchronous actions.
#[derive(Debug, Default)]
pub struct Workbench {
    /// Current contents of the search input.
    pub search_term: String,
    /// Autocomplete suggestions for the current input.
    pub suggestions: Vec<Suggestion>,
    /// The selected NAMASTE term, if any.
    pub selected: Option<CodedConcept>,
    /// Translation result for the selected term.
    pub translation: Option<ConceptPair>,
    /// The generated FHIR record, if any.
    pub record: Option<FhirRecord>,
    /// AI assistant results.
    pub diagnoses: Vec<DiagnosisSuggestion>,
    /// Last observed AI job status; `None` when the assistant is idle.
    pub job_status: Option<JobStatus>,
    /// Username to pre-fill on the login form after registration.
    pub login_username: Option<String>,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one flow event into the view state.
    pub fn apply(&mut self, event: &FlowEvent) {
        match event {
            FlowEvent::SuggestionsCleared => self.suggestions.clear(),
            FlowEvent::Suggestions(list) => self.suggestions = list.clone(),
            FlowEvent::TranslationStarted(selected) => {
                self.search_term = selected.display.clone();
                self.selected = Some(selected.clone());
                self.suggestions.clear();
                self.translation = None;
                self.record = None;
            }
            FlowEvent::TranslationReady(pair) => self.translation = Some(pair.clone()),
            FlowEvent::JobCreated { status, .. } => {
                self.diagnoses.clear();
                self.job_status = Some(*status);
            }
            FlowEvent::JobStatusChanged { status, .. } => self.job_status = Some(*status),
            FlowEvent::DiagnosesReady(list) => self.diagnoses = list.clone(),
            FlowEvent::AssistantFailed(_) => self.job_status = Some(JobStatus::Failed),
            // Exhaustion leaves the assistant idle and re-enterable.
            FlowEvent::AssistantExhausted => self.job_status = None,
            FlowEvent::SessionExpired => {}
        }
    }

    /// True while the assistant has an unresolved job.
    pub fn assistant_busy(&self) -> bool {
        matches!(
            self.job_status,
            Some(JobStatus::Pending) | Some(JobStatus::Processing)
        )
    }

    /// Clears AI assistant state (the `Start New Analysis` action).
    pub fn reset_assistant(&mut self) {
        self.diagnoses.clear();
        self.job_status = None;
    }

    /// Clears everything; used on logout and session expiry.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(term: &str) -> Suggestion {
        Suggestion {
            namaste_code: "AYU-001".to_string(),
            traditional_term: term.to_string(),
            biomedical_term: "Fever".to_string(),
            system: "Ayurveda".to_string(),
        }
    }

    #[test]
    fn test_selection_clears_downstream_state() {
        let mut workbench = Workbench::new();
        workbench.suggestions = vec![suggestion("Jvara")];
        workbench.translation = Some(ConceptPair::no_match());

        workbench.apply(&FlowEvent::TranslationStarted(CodedConcept::new(
            "AYU-001", "Jvara",
        )));

        assert!(workbench.suggestions.is_empty());
        assert!(workbench.translation.is_none());
        assert!(workbench.record.is_none());
        assert_eq!(workbench.search_term, "Jvara");
        assert_eq!(workbench.selected.as_ref().unwrap().code, "AYU-001");
    }

    #[test]
    fn test_suggestions_replaced_wholesale() {
        let mut workbench = Workbench::new();
        workbench.apply(&FlowEvent::Suggestions(vec![suggestion("Jvara")]));
        workbench.apply(&FlowEvent::Suggestions(vec![
            suggestion("Madhumeha"),
            suggestion("Kasa"),
        ]));
        assert_eq!(workbench.suggestions.len(), 2);
    }

    #[test]
    fn test_exhaustion_leaves_assistant_idle() {
        let mut workbench = Workbench::new();
        workbench.apply(&FlowEvent::JobCreated {
            job_id: "j1".to_string(),
            status: JobStatus::Pending,
        });
        assert!(workbench.assistant_busy());

        workbench.apply(&FlowEvent::AssistantExhausted);
        assert!(!workbench.assistant_busy());
        assert!(workbench.job_status.is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut workbench = Workbench::new();
        workbench.search_term = "jvara".to_string();
        workbench.suggestions = vec![suggestion("Jvara")];
        workbench.selected = Some(CodedConcept::new("AYU-001", "Jvara"));
        workbench.translation = Some(ConceptPair::no_match());
        workbench.job_status = Some(JobStatus::Processing);

        workbench.reset();

        assert!(workbench.search_term.is_empty());
        assert!(workbench.suggestions.is_empty());
        assert!(workbench.selected.is_none());
        assert!(workbench.translation.is_none());
        assert!(workbench.job_status.is_none());
    }
}
