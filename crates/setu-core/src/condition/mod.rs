//! FHIR Condition output flow.

pub mod model;
pub mod service;

pub use model::{
    ConditionRequest, FhirRecord, DEFAULT_PATIENT_ID, DOWNLOAD_FILENAME, RECORD_ID,
    RECORD_VERSION_ID,
};
pub use service::{BundleReceipt, ConditionApi, StoredEntry};
