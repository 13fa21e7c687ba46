use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde_json::json;

use shared_config::AppConfig;

pub struct TestConfig {
    pub api_base_url: String,
    pub access_token: Option<String>,
    pub clinic_utc_offset_minutes: i32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            access_token: Some("test-access-token".to_string()),
            clinic_utc_offset_minutes: 0,
        }
    }
}

impl TestConfig {
    /// Points the config at a mock upstream such as a `wiremock::MockServer`.
    pub fn with_api_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            access_token: self.access_token.clone(),
            clinic_utc_offset_minutes: self.clinic_utc_offset_minutes,
            port: 0,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct MockApiResponses;

impl MockApiResponses {
    pub fn appointment_response(
        id: i64,
        status: &str,
        scheduled_datetime: DateTime<Utc>,
        patient_name: &str,
        doctor_name: &str,
    ) -> serde_json::Value {
        json!({
            "id": id,
            "scheduled_datetime": scheduled_datetime.to_rfc3339(),
            "status": status,
            "appointment_type": "consultation",
            "patient_id": 100 + id,
            "doctor_id": 7,
            "patient_name": patient_name,
            "doctor_name": doctor_name,
            "duration_minutes": 45,
            "notes": null
        })
    }

    pub fn patient_response(id: i64, first_name: &str, last_name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "first_name": first_name,
            "last_name": last_name,
            "email": format!("{}.{}@example.com", first_name.to_lowercase(), last_name.to_lowercase()),
            "phone": "+55 11 99999-0000"
        })
    }

    pub fn doctor_response(id: i64, first_name: &str, last_name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "first_name": first_name,
            "last_name": last_name,
            "email": format!("dr.{}@example.com", last_name.to_lowercase()),
            "role": "doctor"
        })
    }

    pub fn product_response(id: i64, name: &str, current_stock: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "category": "medication",
            "unit_of_measure": "box",
            "current_stock": current_stock,
            "min_stock": 5,
            "is_active": true
        })
    }

    pub fn prescription_response(id: i64, medication_name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "medication_name": medication_name,
            "dosage": "500mg",
            "frequency": "every 8 hours",
            "issued_date": "2026-09-01T10:00:00Z",
            "doctor_name": "Dr. Ana Souza",
            "is_active": true
        })
    }

    pub fn exam_result_response(id: i64, exam_type: &str) -> serde_json::Value {
        json!({
            "id": id,
            "exam_type": exam_type,
            "exam_date": "2026-09-10T08:30:00Z",
            "status": "available",
            "result_summary": "Within reference range"
        })
    }

    pub fn error_detail(message: &str) -> serde_json::Value {
        json!({
            "detail": message
        })
    }
}
