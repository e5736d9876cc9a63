//! Audit-log entries as returned by `/logs`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One audit entry. Timestamps arrive as naive datetimes (the service
/// serializes without an offset); `details` is free-form JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub actor: String,
    pub action: String,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_service_payload() {
        let json = r#"{
            "id": "0a1b2c",
            "created_at": "2025-09-27T10:12:41.123456",
            "actor": "system",
            "action": "translate",
            "resource": "AYU-001",
            "details": {"display": "Jvara"}
        }"#;
        let entry: AuditEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.action, "translate");
        assert_eq!(entry.resource.as_deref(), Some("AYU-001"));
    }

    #[test]
    fn test_resource_and_details_are_optional() {
        let json = r#"{
            "id": "0a1b2c",
            "created_at": "2025-09-27T10:12:41",
            "actor": "system",
            "action": "bundle-condition-store"
        }"#;
        let entry: AuditEntry = serde_json::from_str(json).unwrap();
        assert!(entry.resource.is_none());
        assert!(entry.details.is_none());
    }
}
