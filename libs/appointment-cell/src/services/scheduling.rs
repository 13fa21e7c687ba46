// libs/appointment-cell/src/services/scheduling.rs
use std::future::Future;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use shared_api_client::RestClient;
use shared_config::AppConfig;
use shared_models::auth::AccessToken;
use shared_models::notice::Notice;

use crate::models::{
    Appointment, AppointmentError, AppointmentId, AppointmentStatus, CreateAppointmentRequest,
    Doctor, FormOptions, MutationOutcome, Patient, StatusUpdateRequest, UpdateAppointmentRequest,
};
use crate::services::calendar::reschedule_request;
use crate::services::lifecycle::AppointmentLifecycleService;

const APPOINTMENTS_PATH: &str = "/api/appointments";
const PATIENTS_PATH: &str = "/api/patients";
const DOCTORS_PATH: &str = "/api/users/doctors";

/// Reads and mutations behind the scheduling view.
///
/// Mutations are never applied locally: each one is sent to the clinic API
/// and followed by a full reload of the appointment list, whether it
/// succeeded or not.
pub struct SchedulingService {
    client: RestClient,
    lifecycle: AppointmentLifecycleService,
}

impl SchedulingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: RestClient::new(config),
            lifecycle: AppointmentLifecycleService::new(),
        }
    }

    pub async fn load_appointments(&self, token: &AccessToken) -> Result<Vec<Appointment>, AppointmentError> {
        let appointments: Vec<Appointment> = self.client.get(APPOINTMENTS_PATH, token).await?;
        debug!("Loaded {} appointments", appointments.len());
        Ok(appointments)
    }

    pub async fn find_appointment(
        &self,
        appointment_id: AppointmentId,
        token: &AccessToken,
    ) -> Result<Appointment, AppointmentError> {
        self.load_appointments(token)
            .await?
            .into_iter()
            .find(|a| a.id == appointment_id)
            .ok_or(AppointmentError::NotFound(appointment_id))
    }

    /// Patients and doctors for the appointment form, fetched concurrently.
    pub async fn load_form_options(&self, token: &AccessToken) -> Result<FormOptions, AppointmentError> {
        let (patients, doctors) = futures::try_join!(
            self.client.get::<Vec<Patient>>(PATIENTS_PATH, token),
            self.client.get::<Vec<Doctor>>(DOCTORS_PATH, token),
        )?;

        Ok(FormOptions { patients, doctors })
    }

    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
        token: &AccessToken,
    ) -> Result<MutationOutcome, AppointmentError> {
        if request.appointment_type.trim().is_empty() {
            return Err(AppointmentError::ValidationError(
                "appointment_type is required".to_string(),
            ));
        }

        let outcome = self
            .run_mutation(token, "create", "Appointment created successfully", async {
                self.client
                    .post::<Value, _>(APPOINTMENTS_PATH, token, &request)
                    .await?;
                Ok::<(), AppointmentError>(())
            })
            .await;

        Ok(outcome)
    }

    /// Full edit. Status is left alone; it only moves through
    /// [`Self::change_status`].
    pub async fn update_appointment(
        &self,
        appointment_id: AppointmentId,
        request: UpdateAppointmentRequest,
        token: &AccessToken,
    ) -> Result<MutationOutcome, AppointmentError> {
        let path = format!("{}/{}", APPOINTMENTS_PATH, appointment_id);

        let outcome = self
            .run_mutation(token, "update", "Appointment updated successfully", async {
                self.client.put::<Value, _>(&path, token, &request).await?;
                Ok::<(), AppointmentError>(())
            })
            .await;

        Ok(outcome)
    }

    /// Drop or resize on the calendar.
    pub async fn move_appointment(
        &self,
        appointment_id: AppointmentId,
        new_start: DateTime<Utc>,
        token: &AccessToken,
    ) -> Result<MutationOutcome, AppointmentError> {
        let appointment = self.find_appointment(appointment_id, token).await?;
        let request = reschedule_request(&appointment, new_start)?;
        let path = format!("{}/{}", APPOINTMENTS_PATH, appointment_id);

        let outcome = self
            .run_mutation(token, "reschedule", "Appointment rescheduled successfully", async {
                self.client.put::<Value, _>(&path, token, &request).await?;
                Ok::<(), AppointmentError>(())
            })
            .await;

        Ok(outcome)
    }

    pub async fn check_in(
        &self,
        appointment_id: AppointmentId,
        token: &AccessToken,
    ) -> Result<MutationOutcome, AppointmentError> {
        self.change_status(appointment_id, AppointmentStatus::CheckedIn, token)
            .await
    }

    pub async fn cancel(
        &self,
        appointment_id: AppointmentId,
        token: &AccessToken,
    ) -> Result<MutationOutcome, AppointmentError> {
        self.change_status(appointment_id, AppointmentStatus::Cancelled, token)
            .await
    }

    /// Validates the transition against the current server state, then asks
    /// the server to apply it. Disallowed transitions never reach the server.
    pub async fn change_status(
        &self,
        appointment_id: AppointmentId,
        new_status: AppointmentStatus,
        token: &AccessToken,
    ) -> Result<MutationOutcome, AppointmentError> {
        let appointment = self.find_appointment(appointment_id, token).await?;
        self.lifecycle
            .validate_status_transition(appointment.status, new_status)?;

        let path = format!("{}/{}/status", APPOINTMENTS_PATH, appointment_id);
        let body = StatusUpdateRequest { status: new_status };

        let outcome = self
            .run_mutation(token, "status change", status_message(new_status), async {
                self.client.patch::<Value, _>(&path, token, &body).await?;
                Ok::<(), AppointmentError>(())
            })
            .await;

        Ok(outcome)
    }

    async fn run_mutation<F>(
        &self,
        token: &AccessToken,
        action: &str,
        success_message: &str,
        mutation: F,
    ) -> MutationOutcome
    where
        F: Future<Output = Result<(), AppointmentError>>,
    {
        let result = mutation.await;

        let notice = match &result {
            Ok(()) => {
                info!("Appointment {} succeeded", action);
                Notice::success(success_message)
            }
            Err(e) => {
                error!("Appointment {} failed: {}", action, e);
                Notice::error(e.user_message())
            }
        };

        let appointments = match self.load_appointments(token).await {
            Ok(list) => Some(list),
            Err(e) => {
                warn!("Reload after appointment {} failed: {}", action, e);
                None
            }
        };

        MutationOutcome {
            success: result.is_ok(),
            notice,
            appointments,
            error: result.err(),
        }
    }
}

fn status_message(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::CheckedIn => "Patient checked in",
        AppointmentStatus::InConsultation => "Consultation started",
        AppointmentStatus::Completed => "Appointment completed",
        AppointmentStatus::Cancelled => "Appointment cancelled",
        AppointmentStatus::Scheduled | AppointmentStatus::Unknown => "Appointment status updated",
    }
}
