// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

/// Status table for appointments:
/// `scheduled -> checked_in -> in_consultation -> completed`, with
/// `cancelled` reachable from every non-terminal state.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed
    pub fn validate_status_transition(
        &self,
        current_status: AppointmentStatus,
        new_status: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!("Validating status transition from {} to {}", current_status, new_status);

        if !self.get_valid_transitions(current_status).contains(&new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(AppointmentError::InvalidStatusTransition {
                from: current_status,
                to: new_status,
            });
        }

        Ok(())
    }

    /// Get all valid next statuses for a given current status
    pub fn get_valid_transitions(&self, current_status: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current_status {
            AppointmentStatus::Scheduled => vec![
                AppointmentStatus::CheckedIn,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::CheckedIn => vec![
                AppointmentStatus::InConsultation,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::InConsultation => vec![
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
            ],
            // Terminal states, and labels we cannot reason about
            AppointmentStatus::Completed
            | AppointmentStatus::Cancelled
            | AppointmentStatus::Unknown => vec![],
        }
    }

    pub fn can_check_in(&self, status: AppointmentStatus) -> bool {
        status == AppointmentStatus::Scheduled
    }

    pub fn can_cancel(&self, status: AppointmentStatus) -> bool {
        self.get_valid_transitions(status)
            .contains(&AppointmentStatus::Cancelled)
    }

    /// Whether the calendar may move or resize the appointment.
    pub fn is_draggable(&self, status: AppointmentStatus) -> bool {
        !matches!(status, AppointmentStatus::Cancelled | AppointmentStatus::Unknown)
    }
}
