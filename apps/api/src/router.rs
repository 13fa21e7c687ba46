use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use inventory_cell::router::inventory_routes;
use patient_cell::router::create_patient_router;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Prontivus dashboard is running!" }))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/patient", create_patient_router(state.clone()))
        .nest("/inventory", inventory_routes(state))
}
