//! AI differential-diagnosis flow: job model, poll schedule, output parsing.

pub mod model;
pub mod parser;
pub mod poll;
pub mod service;

pub use model::{DiagnosisSuggestion, JobHandle, JobSnapshot, JobStatus};
pub use parser::parse_suggestions;
pub use poll::{PollSchedule, MAX_POLL_ATTEMPTS, POLL_INTERVAL};
pub use service::DiagnosisApi;
