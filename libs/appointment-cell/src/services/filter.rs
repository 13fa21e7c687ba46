use crate::models::{Appointment, AppointmentError, AppointmentStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    /// Parses the `status` query value; a missing value, empty string or
    /// `all` disables the filter.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppointmentError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(StatusFilter::All),
            Some(value) if value.eq_ignore_ascii_case("all") => Ok(StatusFilter::All),
            Some(value) => Ok(StatusFilter::Only(value.parse()?)),
        }
    }

    pub fn matches(&self, status: AppointmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => *expected == status,
        }
    }
}

/// Case-insensitive substring match on patient or doctor name. Only the
/// empty term matches everything.
pub fn matches_search(appointment: &Appointment, search_term: &str) -> bool {
    let needle = search_term.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    appointment.patient_display_name().to_lowercase().contains(&needle)
        || appointment.doctor_display_name().to_lowercase().contains(&needle)
}

pub fn filter_appointments(
    appointments: &[Appointment],
    search_term: &str,
    status_filter: StatusFilter,
) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| status_filter.matches(a.status) && matches_search(a, search_term))
        .cloned()
        .collect()
}
