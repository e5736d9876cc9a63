//! Events pushed from the flow services to the frontend.

use setu_core::diagnosis::{DiagnosisSuggestion, JobStatus};
use setu_core::terminology::{CodedConcept, ConceptPair, Suggestion};

/// One asynchronous result from a flow service.
///
/// The frontend drains these from a channel, folds them into its
/// [`crate::Workbench`], and renders. Services never render themselves.
#[derive(Debug, Clone)]
pub enum FlowEvent {
    /// The suggestion list was cleared (input below the minimum length).
    SuggestionsCleared,
    /// A suggestion fetch completed; replaces the list wholesale.
    Suggestions(Vec<Suggestion>),
    /// A term was selected; translation is running for it.
    TranslationStarted(CodedConcept),
    /// Translation finished (possibly with a placeholder pair).
    TranslationReady(ConceptPair),
    /// An AI diagnosis job was accepted by the service.
    JobCreated { job_id: String, status: JobStatus },
    /// A poll observed the job in this state.
    JobStatusChanged { status: JobStatus, attempt: u32 },
    /// The completed job's output, parsed into suggestions.
    DiagnosesReady(Vec<DiagnosisSuggestion>),
    /// The job failed, or polling could not reach the service.
    AssistantFailed(String),
    /// The poll ceiling was reached without the job resolving.
    AssistantExhausted,
    /// The service rejected our token; the session must be torn down.
    SessionExpired,
}
