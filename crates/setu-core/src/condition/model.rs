//! FHIR Condition record model and client-side stamping.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::terminology::{CodedConcept, ConceptPair};

/// Fixed record id stamped onto every generated Condition.
pub const RECORD_ID: &str = "condition-1";

/// Fixed version id stamped onto every generated Condition.
pub const RECORD_VERSION_ID: &str = "1";

/// Demo patient reference sent with every generation request.
pub const DEFAULT_PATIENT_ID: &str = "Patient/example-01";

/// Filename used by the download action.
pub const DOWNLOAD_FILENAME: &str = "fhir_condition.json";

/// Payload for `/generate-fhir-condition`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRequest {
    pub patient_id: String,
    pub namaste_code: String,
    pub namaste_display: String,
    pub icd_code: String,
    pub icd_display: String,
}

impl ConditionRequest {
    /// Builds the request from the selected term and the translation
    /// result. The biomedical slot supplies the ICD pair.
    pub fn from_selection(selected: &CodedConcept, pair: &ConceptPair) -> Self {
        Self {
            patient_id: DEFAULT_PATIENT_ID.to_string(),
            namaste_code: selected.code.clone(),
            namaste_display: selected.display.clone(),
            icd_code: pair.biomed.code.clone(),
            icd_display: pair.biomed.display.clone(),
        }
    }
}

/// The fixed security labels stamped into `meta.security`.
fn security_labels() -> Value {
    json!([
        {
            "system": "http://terminology.hl7.org/CodeSystem/v3-ActReason",
            "code": "HTEST",
            "display": "Healthcare Test Data"
        },
        {
            "system": "http://example.org/consent",
            "code": "CONSENT-GIVEN",
            "display": "Patient Consent Obtained"
        }
    ])
}

/// A generated FHIR Condition record.
///
/// The service returns a partial document; the client unconditionally
/// overwrites `id` and `meta` with fixed demo metadata. This is cosmetic
/// enrichment for display purposes only; none of it is server-authoritative,
/// and it will diverge from any real provenance system. The record is
/// immutable once stamped; regeneration produces a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FhirRecord(Value);

impl FhirRecord {
    /// Wraps the partial document returned by the service, stamping the
    /// fixed id, version, timestamp, and security labels.
    pub fn stamped(document: Value, generated_at: DateTime<Utc>) -> Self {
        let mut fields = match document {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        fields.insert("id".to_string(), json!(RECORD_ID));
        fields.insert(
            "meta".to_string(),
            json!({
                "versionId": RECORD_VERSION_ID,
                "lastUpdated": generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                "security": security_labels(),
            }),
        );
        Self(Value::Object(fields))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Indented JSON text, as used by both the copy and download actions.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn partial_condition() -> Value {
        json!({
            "resourceType": "Condition",
            "code": {
                "text": "Jvara / Fever, unspecified",
                "coding": [
                    {"system": "http://ayush.gov.in/namaste", "code": "AYU-001", "display": "Jvara"},
                    {"system": "http://id.who.int/icd/release/11/mms", "code": "MG26", "display": "Fever, unspecified"}
                ]
            },
            "subject": {"reference": "Patient/Patient/example-01"}
        })
    }

    #[test]
    fn test_stamp_round_trip_preserves_fixed_metadata() {
        let generated_at = Utc.with_ymd_and_hms(2025, 9, 27, 10, 30, 0).unwrap();
        let record = FhirRecord::stamped(partial_condition(), generated_at);

        let text = record.to_pretty_json().unwrap();
        let reparsed: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(reparsed["id"], RECORD_ID);
        assert_eq!(reparsed["meta"]["versionId"], RECORD_VERSION_ID);
        assert_eq!(reparsed["meta"]["lastUpdated"], "2025-09-27T10:30:00.000Z");
        let security = reparsed["meta"]["security"].as_array().unwrap();
        assert_eq!(security.len(), 2);
        assert_eq!(security[0]["code"], "HTEST");
        assert_eq!(security[1]["code"], "CONSENT-GIVEN");
    }

    #[test]
    fn test_stamp_preserves_service_payload() {
        let record = FhirRecord::stamped(partial_condition(), Utc::now());
        assert_eq!(record.as_value()["resourceType"], "Condition");
        assert_eq!(record.as_value()["code"]["coding"][1]["code"], "MG26");
    }

    #[test]
    fn test_stamp_overwrites_server_supplied_metadata() {
        let mut document = partial_condition();
        document["id"] = json!("server-id");
        document["meta"] = json!({"versionId": "42"});
        let record = FhirRecord::stamped(document, Utc::now());
        assert_eq!(record.as_value()["id"], RECORD_ID);
        assert_eq!(record.as_value()["meta"]["versionId"], RECORD_VERSION_ID);
    }

    #[test]
    fn test_request_from_selection_uses_biomedical_slot() {
        let selected = CodedConcept::new("AYU-001", "Jvara");
        let pair = ConceptPair::new(
            CodedConcept::new("SK00", "Fever disorder (TM2)"),
            CodedConcept::new("MG26", "Fever, unspecified"),
        );
        let request = ConditionRequest::from_selection(&selected, &pair);
        assert_eq!(request.patient_id, DEFAULT_PATIENT_ID);
        assert_eq!(request.namaste_code, "AYU-001");
        assert_eq!(request.icd_code, "MG26");
        assert_eq!(request.icd_display, "Fever, unspecified");
    }
}
