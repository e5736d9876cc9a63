//! AI diagnosis job domain model.

use serde::{Deserialize, Serialize};

use crate::terminology::CodedConcept;

/// Server-side state of a diagnosis job.
///
/// Jobs are created `pending`, move to `processing` when a worker picks
/// them up, and end `completed` or `failed`. The client never mutates a
/// job; it only observes these states through the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Terminal states stop the poll loop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// The identifier and initial status returned by `/create-namaste-job`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobHandle {
    pub job_id: String,
    pub status: JobStatus,
}

/// One observation of a job from `/namaste-job/{id}`.
///
/// `prompt` carries the AI output once the job completes; `error` carries
/// the failure detail when it fails. The wire payload also has timestamps
/// the client does not use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub status: JobStatus,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One AI-suggested diagnosis, parsed from the completed job's output.
///
/// Wire spellings follow the AI contract (`NAMASTE_code`,
/// `ICD_11_TM2_mapping`, ...). Everything but the diagnosis itself is
/// optional in practice, so the remaining fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisSuggestion {
    pub diagnosis: String,
    #[serde(rename = "NAMASTE_code", default)]
    pub namaste_code: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(rename = "ICD_11_TM2_mapping", default)]
    pub tm2_mapping: String,
    #[serde(rename = "ICD_11_Biomedicine_mapping", default)]
    pub biomed_mapping: String,
}

impl DiagnosisSuggestion {
    /// Wraps raw, unparseable AI output into a single synthetic suggestion
    /// so the user still sees what came back.
    pub fn unstructured(raw: &str) -> Self {
        Self {
            diagnosis: "Unstructured AI response".to_string(),
            namaste_code: String::new(),
            reasoning: raw.trim().to_string(),
            tm2_mapping: String::new(),
            biomed_mapping: String::new(),
        }
    }

    /// The concept a selection hands to the translation flow, exactly as if
    /// the user had picked an autocomplete suggestion.
    pub fn as_concept(&self) -> CodedConcept {
        CodedConcept::new(&self.namaste_code, &self.diagnosis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_spelling() {
        let status: JobStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(status, JobStatus::Processing);
        assert_eq!(status.to_string(), "processing");
    }

    #[test]
    fn test_terminal_states() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
    }

    #[test]
    fn test_snapshot_ignores_unused_wire_fields() {
        let json = r#"{
            "job_id": "b2f9",
            "status": "completed",
            "prompt": "[]",
            "error": null,
            "created_at": "2025-01-01T00:00:00",
            "completed_at": "2025-01-01T00:00:09"
        }"#;
        let snapshot: JobSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.status, JobStatus::Completed);
        assert_eq!(snapshot.prompt.as_deref(), Some("[]"));
    }

    #[test]
    fn test_suggestion_wire_spellings() {
        let json = r#"{
            "diagnosis": "Jvara",
            "NAMASTE_code": "AYU-001",
            "reasoning": "Intermittent fever with body ache.",
            "ICD_11_TM2_mapping": "SK00",
            "ICD_11_Biomedicine_mapping": "MG26"
        }"#;
        let suggestion: DiagnosisSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(suggestion.namaste_code, "AYU-001");
        assert_eq!(suggestion.tm2_mapping, "SK00");
        assert_eq!(suggestion.as_concept().display, "Jvara");
    }
}
