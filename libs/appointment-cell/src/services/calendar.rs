use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, CalendarEvent, CalendarEventProps,
    UpdateAppointmentRequest,
};
use crate::services::lifecycle::AppointmentLifecycleService;

/// Every calendar block is drawn with this length; `duration_minutes` is not
/// consulted.
pub const CALENDAR_EVENT_MINUTES: i64 = 30;

pub fn status_color(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "#3b82f6",
        AppointmentStatus::CheckedIn => "#f59e0b",
        AppointmentStatus::InConsultation => "#8b5cf6",
        AppointmentStatus::Completed => "#10b981",
        AppointmentStatus::Cancelled => "#ef4444",
        AppointmentStatus::Unknown => "#6b7280",
    }
}

fn event_title(appointment: &Appointment) -> String {
    let patient = appointment.patient_display_name();
    let doctor = appointment.doctor_display_name();

    match (patient.is_empty(), doctor.is_empty()) {
        (false, false) => format!("{} - {}", patient, doctor),
        (false, true) => patient.to_string(),
        (true, false) => doctor.to_string(),
        (true, true) => appointment
            .appointment_type
            .clone()
            .unwrap_or_else(|| format!("Appointment #{}", appointment.id)),
    }
}

pub fn to_calendar_event(appointment: &Appointment) -> CalendarEvent {
    let lifecycle = AppointmentLifecycleService::new();
    let start = appointment.scheduled_datetime;

    CalendarEvent {
        id: appointment.id.to_string(),
        title: event_title(appointment),
        start,
        end: start + Duration::minutes(CALENDAR_EVENT_MINUTES),
        editable: lifecycle.is_draggable(appointment.status),
        background_color: status_color(appointment.status).to_string(),
        extended_props: CalendarEventProps {
            appointment_id: appointment.id,
            status: appointment.status,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            appointment_type: appointment.appointment_type.clone(),
        },
    }
}

pub fn to_calendar_events(appointments: &[Appointment]) -> Vec<CalendarEvent> {
    appointments.iter().map(to_calendar_event).collect()
}

/// Builds the `PUT` body for a drop or resize: only the start changes, the
/// patient, doctor and type are sent back as they were.
pub fn reschedule_request(
    appointment: &Appointment,
    new_start: DateTime<Utc>,
) -> Result<UpdateAppointmentRequest, AppointmentError> {
    if !AppointmentLifecycleService::new().is_draggable(appointment.status) {
        warn!("Refusing to move appointment {} in status {}", appointment.id, appointment.status);
        return Err(AppointmentError::NotDraggable(appointment.status));
    }

    debug!(
        "Moving appointment {} from {} to {}",
        appointment.id, appointment.scheduled_datetime, new_start
    );

    Ok(UpdateAppointmentRequest {
        patient_id: appointment.patient_id,
        doctor_id: appointment.doctor_id,
        scheduled_datetime: new_start,
        appointment_type: appointment.appointment_type.clone(),
        notes: appointment.notes.clone(),
        reason: appointment.reason.clone(),
    })
}
