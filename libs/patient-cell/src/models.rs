use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prescription as listed in the patient portal. Fields the portal does not
/// interpret are kept in `extra` and passed through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i64,
    #[serde(default)]
    pub medication_name: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub issued_date: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    pub id: i64,
    #[serde(default)]
    pub exam_type: Option<String>,
    #[serde(default)]
    pub exam_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result_summary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrescriptionQuery {
    pub active_only: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum PatientPortalError {
    #[error(transparent)]
    Api(#[from] shared_api_client::ApiClientError),
}

impl From<PatientPortalError> for shared_models::error::AppError {
    fn from(err: PatientPortalError) -> Self {
        match err {
            PatientPortalError::Api(e) => e.into(),
        }
    }
}
