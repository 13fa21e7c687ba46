use std::sync::Arc;
use axum::{
    extract::{Extension, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::AccessToken;
use shared_models::error::AppError;

use crate::models::PrescriptionQuery;
use crate::services::PatientPortalService;

#[axum::debug_handler]
pub async fn get_prescriptions(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<PrescriptionQuery>,
) -> Result<Json<Value>, AppError> {
    let service = PatientPortalService::new(&config);

    let prescriptions = service
        .get_prescriptions(query.active_only.unwrap_or(false), &token)
        .await?;

    Ok(Json(json!({
        "prescriptions": prescriptions,
        "total": prescriptions.len()
    })))
}

#[axum::debug_handler]
pub async fn get_exam_results(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
) -> Result<Json<Value>, AppError> {
    let service = PatientPortalService::new(&config);

    let exam_results = service.get_exam_results(&token).await?;

    Ok(Json(json!({
        "exam_results": exam_results,
        "total": exam_results.len()
    })))
}
