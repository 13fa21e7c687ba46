// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use shared_config::AppConfig;
use shared_models::auth::AccessToken;
use shared_models::error::AppError;

use crate::models::{
    AppointmentError, AppointmentId, AppointmentStatus, BoardQuery, CreateAppointmentRequest,
    MoveEventRequest, MutationOutcome, StatusUpdateRequest, UpdateAppointmentRequest,
};
use crate::services::board::AppointmentBoard;
use crate::services::filter::StatusFilter;
use crate::services::queue::{clinic_offset, clinic_today};
use crate::services::scheduling::SchedulingService;

type MutationResponse = Result<(StatusCode, Json<Value>), AppError>;

/// Failed mutations keep the reloaded list in the body but answer with the
/// status of the underlying error.
fn mutation_response(outcome: MutationOutcome) -> (StatusCode, Json<Value>) {
    let MutationOutcome {
        success,
        notice,
        appointments,
        error,
    } = outcome;

    let status = match error {
        Some(e) => AppError::from(e).status_code(),
        None => StatusCode::OK,
    };

    (
        status,
        Json(json!({
            "success": success,
            "notice": notice,
            "appointments": appointments,
        })),
    )
}

async fn load_board(
    config: &AppConfig,
    token: &AccessToken,
    query: &BoardQuery,
) -> Result<AppointmentBoard, AppError> {
    let status_filter = StatusFilter::parse(query.status.as_deref())?;
    let appointments = SchedulingService::new(config).load_appointments(token).await?;

    let mut board = AppointmentBoard::new(appointments);
    board.set_search_term(query.search.clone().unwrap_or_default());
    board.set_status_filter(status_filter);
    Ok(board)
}

// ==============================================================================
// VIEW HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_appointments(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<Value>, AppError> {
    let board = load_board(&config, &token, &query).await?;

    Ok(Json(json!({
        "appointments": board.filtered(),
        "total": board.appointments().len(),
        "filtered": board.filtered().len(),
    })))
}

#[axum::debug_handler]
pub async fn get_board(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<Value>, AppError> {
    let board = load_board(&config, &token, &query).await?;
    let offset = clinic_offset(config.clinic_utc_offset_minutes);
    let view = board.view(clinic_today(Utc::now(), offset), offset);

    Ok(Json(json!(view)))
}

#[axum::debug_handler]
pub async fn get_calendar_events(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<Value>, AppError> {
    let board = load_board(&config, &token, &query).await?;

    Ok(Json(json!({
        "events": board.calendar_events(),
    })))
}

#[axum::debug_handler]
pub async fn get_queue(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
) -> Result<Json<Value>, AppError> {
    let board = load_board(&config, &token, &BoardQuery::default()).await?;
    let offset = clinic_offset(config.clinic_utc_offset_minutes);
    let today = clinic_today(Utc::now(), offset);
    let queue = board.queues(today, offset);

    Ok(Json(json!({
        "date": today,
        "waiting": queue.waiting,
        "schedulable": queue.schedulable,
    })))
}

#[axum::debug_handler]
pub async fn get_form_options(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
) -> Result<Json<Value>, AppError> {
    let options = SchedulingService::new(&config)
        .load_form_options(&token)
        .await?;

    Ok(Json(json!(options)))
}

// ==============================================================================
// MUTATION HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Json(request): Json<CreateAppointmentRequest>,
) -> MutationResponse {
    let outcome = SchedulingService::new(&config)
        .create_appointment(request, &token)
        .await?;

    Ok(mutation_response(outcome))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Path(appointment_id): Path<AppointmentId>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> MutationResponse {
    let outcome = SchedulingService::new(&config)
        .update_appointment(appointment_id, request, &token)
        .await?;

    Ok(mutation_response(outcome))
}

#[axum::debug_handler]
pub async fn move_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Path(appointment_id): Path<AppointmentId>,
    Json(request): Json<MoveEventRequest>,
) -> MutationResponse {
    let outcome = SchedulingService::new(&config)
        .move_appointment(appointment_id, request.start, &token)
        .await?;

    Ok(mutation_response(outcome))
}

#[axum::debug_handler]
pub async fn check_in_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Path(appointment_id): Path<AppointmentId>,
) -> MutationResponse {
    let outcome = SchedulingService::new(&config)
        .check_in(appointment_id, &token)
        .await?;

    Ok(mutation_response(outcome))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Path(appointment_id): Path<AppointmentId>,
) -> MutationResponse {
    let outcome = SchedulingService::new(&config)
        .cancel(appointment_id, &token)
        .await?;

    Ok(mutation_response(outcome))
}

#[axum::debug_handler]
pub async fn change_appointment_status(
    State(config): State<Arc<AppConfig>>,
    Extension(token): Extension<AccessToken>,
    Path(appointment_id): Path<AppointmentId>,
    Json(request): Json<StatusUpdateRequest>,
) -> MutationResponse {
    if request.status == AppointmentStatus::Unknown {
        warn!("Rejected unknown target status for appointment {}", appointment_id);
        return Err(AppointmentError::ValidationError("Unknown appointment status".to_string()).into());
    }

    let outcome = SchedulingService::new(&config)
        .change_status(appointment_id, request.status, &token)
        .await?;

    Ok(mutation_response(outcome))
}
