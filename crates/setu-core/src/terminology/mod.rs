//! Terminology domain: NAMASTE suggestions and ICD-11 translation.

pub mod model;
pub mod service;

pub use model::{CodedConcept, ConceptPair, IcdCandidate, Suggestion};
pub use service::TerminologyApi;
