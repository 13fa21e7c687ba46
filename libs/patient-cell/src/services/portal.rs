use chrono::{DateTime, Utc};
use tracing::debug;

use shared_api_client::RestClient;
use shared_config::AppConfig;
use shared_models::auth::AccessToken;
use shared_models::flexible_datetime;

use crate::models::{ExamResult, PatientPortalError, Prescription};

const PRESCRIPTIONS_PATH: &str = "/api/patient/prescriptions";
const EXAM_RESULTS_PATH: &str = "/api/patient/exam-results";

/// Read-only views for the signed-in patient. The clinic API scopes both
/// lists to the owner of the token.
pub struct PatientPortalService {
    client: RestClient,
}

impl PatientPortalService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: RestClient::new(config),
        }
    }

    pub async fn get_prescriptions(
        &self,
        active_only: bool,
        token: &AccessToken,
    ) -> Result<Vec<Prescription>, PatientPortalError> {
        let mut prescriptions: Vec<Prescription> = self.client.get(PRESCRIPTIONS_PATH, token).await?;
        debug!("Fetched {} prescriptions", prescriptions.len());

        if active_only {
            prescriptions.retain(|p| p.is_active);
        }

        Ok(prescriptions)
    }

    /// Most recent exams first; undated exams go last.
    pub async fn get_exam_results(&self, token: &AccessToken) -> Result<Vec<ExamResult>, PatientPortalError> {
        let mut results: Vec<ExamResult> = self.client.get(EXAM_RESULTS_PATH, token).await?;
        debug!("Fetched {} exam results", results.len());

        results.sort_by(|a, b| exam_sort_key(b).cmp(&exam_sort_key(a)));

        Ok(results)
    }
}

fn exam_sort_key(exam: &ExamResult) -> Option<DateTime<Utc>> {
    exam.exam_date.as_deref().and_then(flexible_datetime::parse)
}
