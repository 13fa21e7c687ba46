// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::access_token_middleware;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppConfig>) -> Router {
    let protected_routes = Router::new()
        // Views
        .route("/", get(handlers::list_appointments).post(handlers::create_appointment))
        .route("/board", get(handlers::get_board))
        .route("/calendar", get(handlers::get_calendar_events))
        .route("/queue", get(handlers::get_queue))
        .route("/form-options", get(handlers::get_form_options))

        // Mutations
        .route("/{appointment_id}", put(handlers::update_appointment))
        .route("/{appointment_id}/move", post(handlers::move_appointment))
        .route("/{appointment_id}/check-in", post(handlers::check_in_appointment))
        .route("/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .route("/{appointment_id}/status", post(handlers::change_appointment_status))

        .layer(middleware::from_fn_with_state(state.clone(), access_token_middleware));

    Router::new()
        .merge(protected_routes)
        .with_state(state)
}
