use std::sync::Arc;
use axum::{middleware, routing::get, Router};
use shared_config::AppConfig;
use shared_utils::extractor::access_token_middleware;

use crate::handlers::*;

pub fn create_patient_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/prescriptions", get(get_prescriptions))
        .route("/exam-results", get(get_exam_results))
        .layer(middleware::from_fn_with_state(config.clone(), access_token_middleware))
        .with_state(config)
}
