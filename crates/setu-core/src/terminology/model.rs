//! Terminology domain model.
//!
//! Field names on the wire keep the service's original spellings
//! (`NAMASTE_Code`, `Traditional_Term`, ...) via serde renames; the Rust
//! side uses snake_case throughout.

use serde::{Deserialize, Serialize};

/// One autocomplete hit from `/autocomplete-namaste`.
///
/// Suggestions are ephemeral view state: each completed fetch replaces the
/// whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "NAMASTE_Code")]
    pub namaste_code: String,
    #[serde(rename = "Traditional_Term")]
    pub traditional_term: String,
    #[serde(rename = "Biomedical_Term")]
    pub biomedical_term: String,
    #[serde(rename = "System")]
    pub system: String,
}

impl Suggestion {
    /// The concept a selection hands to the translation flow.
    pub fn as_concept(&self) -> CodedConcept {
        CodedConcept::new(&self.namaste_code, &self.traditional_term)
    }
}

/// One ranked candidate from `/translate/namaste-to-icd`.
///
/// `code` is the ICD-11 linearization code when the service could resolve
/// one; `id` is an entity reference usable with `/entity/{id}` when it
/// could not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcdCandidate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    pub display: String,
}

/// A code/display pair as rendered in one result slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodedConcept {
    pub code: String,
    pub display: String,
}

/// Code used by every placeholder except the error placeholder.
const PLACEHOLDER_CODE: &str = "N/A";
/// Code used by the visible error placeholder.
const ERROR_CODE: &str = "Error";

impl CodedConcept {
    pub fn new(code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display: display.into(),
        }
    }

    /// Placeholder rendered when the service returned zero candidates.
    pub fn no_match() -> Self {
        Self::new(PLACEHOLDER_CODE, "No match found")
    }

    /// Placeholder rendered when a candidate had neither a code nor an
    /// entity reference to resolve one from.
    pub fn not_found() -> Self {
        Self::new(PLACEHOLDER_CODE, "Not found")
    }

    /// Visible error placeholder; the reason is shown in place of results.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::new(ERROR_CODE, reason)
    }

    pub fn is_placeholder(&self) -> bool {
        self.code == PLACEHOLDER_CODE || self.code == ERROR_CODE
    }
}

impl From<&IcdCandidate> for CodedConcept {
    fn from(candidate: &IcdCandidate) -> Self {
        match &candidate.code {
            Some(code) => Self::new(code, &candidate.display),
            None => Self::new(PLACEHOLDER_CODE, &candidate.display),
        }
    }
}

/// The translation result: a traditional-medicine slot and a biomedical
/// slot. Both slots are always populated; shortages and failures render as
/// placeholders, never as an absent value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptPair {
    pub tm: CodedConcept,
    pub biomed: CodedConcept,
}

impl ConceptPair {
    pub fn new(tm: CodedConcept, biomed: CodedConcept) -> Self {
        Self { tm, biomed }
    }

    /// Both slots referencing the same concept (single-candidate shortage,
    /// or an entity-resolved pair).
    pub fn uniform(concept: CodedConcept) -> Self {
        Self {
            tm: concept.clone(),
            biomed: concept,
        }
    }

    pub fn no_match() -> Self {
        Self::uniform(CodedConcept::no_match())
    }

    pub fn not_found() -> Self {
        Self::uniform(CodedConcept::not_found())
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::uniform(CodedConcept::error(reason))
    }

    /// Selection policy over the ranked candidate list: first candidate
    /// fills the TM slot, second (or the first again when there is no
    /// second) fills the biomedical slot. Zero candidates yield the
    /// "no match" pair.
    pub fn from_candidates(candidates: &[IcdCandidate]) -> Self {
        let Some(first) = candidates.first() else {
            return Self::no_match();
        };
        let second = candidates.get(1).unwrap_or(first);
        Self {
            tm: first.into(),
            biomed: second.into(),
        }
    }

    /// True when either slot is a placeholder. A placeholder pair blocks
    /// FHIR generation.
    pub fn is_placeholder(&self) -> bool {
        self.tm.is_placeholder() || self.biomed.is_placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(code: Option<&str>, display: &str) -> IcdCandidate {
        IcdCandidate {
            id: Some(format!("http://id.who.int/icd/entity/{display}")),
            code: code.map(str::to_string),
            display: display.to_string(),
        }
    }

    #[test]
    fn test_zero_candidates_yield_no_match_in_both_slots() {
        let pair = ConceptPair::from_candidates(&[]);
        assert_eq!(pair.tm, CodedConcept::no_match());
        assert_eq!(pair.biomed, CodedConcept::no_match());
        assert!(pair.is_placeholder());
    }

    #[test]
    fn test_single_candidate_fills_both_slots() {
        let pair = ConceptPair::from_candidates(&[candidate(Some("SK00"), "Fever disorder")]);
        assert_eq!(pair.tm, pair.biomed);
        assert_eq!(pair.tm.code, "SK00");
        assert!(!pair.is_placeholder());
    }

    #[test]
    fn test_two_candidates_split_across_slots() {
        let pair = ConceptPair::from_candidates(&[
            candidate(Some("SK00"), "Fever disorder (TM2)"),
            candidate(Some("MG26"), "Fever, unspecified"),
        ]);
        assert_eq!(pair.tm.code, "SK00");
        assert_eq!(pair.biomed.code, "MG26");
    }

    #[test]
    fn test_extra_candidates_are_ignored() {
        let pair = ConceptPair::from_candidates(&[
            candidate(Some("SK00"), "first"),
            candidate(Some("MG26"), "second"),
            candidate(Some("1A40"), "third"),
        ]);
        assert_eq!(pair.biomed.code, "MG26");
    }

    #[test]
    fn test_codeless_candidate_renders_placeholder_code() {
        let pair = ConceptPair::from_candidates(&[candidate(None, "Unresolved entity")]);
        assert_eq!(pair.tm.code, "N/A");
        assert_eq!(pair.tm.display, "Unresolved entity");
        assert!(pair.is_placeholder());
    }

    #[test]
    fn test_error_pair_carries_reason() {
        let pair = ConceptPair::error("WHO search failed");
        assert_eq!(pair.tm.code, "Error");
        assert_eq!(pair.biomed.display, "WHO search failed");
        assert!(pair.is_placeholder());
    }

    #[test]
    fn test_suggestion_wire_spellings() {
        let json = r#"{
            "NAMASTE_Code": "AYU-001",
            "Traditional_Term": "Jvara",
            "Biomedical_Term": "Fever",
            "System": "Ayurveda"
        }"#;
        let suggestion: Suggestion = serde_json::from_str(json).unwrap();
        assert_eq!(suggestion.namaste_code, "AYU-001");
        assert_eq!(suggestion.as_concept().display, "Jvara");
    }
}
