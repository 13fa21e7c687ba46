// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use shared_api_client::ApiClientError;
use shared_models::error::AppError;
use shared_models::flexible_datetime;
use shared_models::notice::Notice;

pub type AppointmentId = i64;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// Appointment as returned by the clinic API.
///
/// Only the fields the scheduling view reads are typed; `appointment_type`
/// is kept verbatim so edits send back exactly what the server gave us.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(with = "flexible_datetime")]
    pub scheduled_datetime: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub appointment_type: Option<String>,
    pub patient_id: i64,
    pub doctor_id: i64,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Appointment {
    pub fn patient_display_name(&self) -> &str {
        self.patient_name.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn doctor_display_name(&self) -> &str {
        self.doctor_name.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Upstream labels are read through [`FromStr`], so casing and the
/// confirmed/in-progress aliases are handled the same way for payloads and
/// query strings.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    CheckedIn,
    InConsultation,
    Completed,
    Cancelled,
    /// Any label this dashboard does not know how to act on.
    Unknown,
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(AppointmentStatus::Unknown))
    }
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::CheckedIn => write!(f, "checked_in"),
            AppointmentStatus::InConsultation => write!(f, "in_consultation"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" | "confirmed" | "pending" => Ok(AppointmentStatus::Scheduled),
            "checked_in" => Ok(AppointmentStatus::CheckedIn),
            "in_consultation" | "in_progress" => Ok(AppointmentStatus::InConsultation),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(AppointmentError::ValidationError(format!(
                "Unknown appointment status: {}",
                other
            ))),
        }
    }
}

/// Minimal identity record used to fill patient and doctor selectors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

pub type Patient = Person;
pub type Doctor = Person;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormOptions {
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: i64,
    pub doctor_id: i64,
    #[serde(with = "flexible_datetime")]
    pub scheduled_datetime: DateTime<Utc>,
    pub appointment_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of a full edit (`PUT`). Never carries a status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateAppointmentRequest {
    pub patient_id: i64,
    pub doctor_id: i64,
    #[serde(with = "flexible_datetime")]
    pub scheduled_datetime: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdateRequest {
    pub status: AppointmentStatus,
}

/// New start reported by the calendar after a drop or a resize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveEventRequest {
    #[serde(with = "flexible_datetime")]
    pub start: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

// ==============================================================================
// DERIVED VIEW MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub editable: bool,
    pub background_color: String,
    pub extended_props: CalendarEventProps,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventProps {
    pub appointment_id: AppointmentId,
    pub status: AppointmentStatus,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueueBoard {
    pub waiting: Vec<Appointment>,
    pub schedulable: Vec<Appointment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub appointments: Vec<Appointment>,
    pub calendar_events: Vec<CalendarEvent>,
    pub queue: QueueBoard,
    pub total: usize,
    pub filtered: usize,
}

/// Result of a mutation: the notice to show and the list as reloaded
/// afterwards. `appointments` is `None` when the reload itself failed.
#[derive(Debug, Serialize)]
pub struct MutationOutcome {
    pub success: bool,
    pub notice: Notice,
    pub appointments: Option<Vec<Appointment>>,
    #[serde(skip)]
    pub error: Option<AppointmentError>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment {0} not found")]
    NotFound(AppointmentId),

    #[error("Cannot change appointment status from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("A {0} appointment cannot be moved")]
    NotDraggable(AppointmentStatus),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Api(#[from] ApiClientError),
}

impl AppointmentError {
    /// Message for the user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            AppointmentError::Api(e) => e.user_message(),
            AppointmentError::ValidationError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        let message = err.to_string();
        match err {
            AppointmentError::NotFound(_) => AppError::NotFound(message),
            AppointmentError::InvalidStatusTransition { .. } | AppointmentError::NotDraggable(_) => {
                AppError::Conflict(message)
            }
            AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
            AppointmentError::Api(e) => AppError::from(e),
        }
    }
}
