use std::cell::OnceCell;

use chrono::{FixedOffset, NaiveDate};

use crate::models::{Appointment, BoardView, CalendarEvent, QueueBoard};
use crate::services::calendar::to_calendar_events;
use crate::services::filter::{filter_appointments, StatusFilter};
use crate::services::queue::partition_queue;

/// In-memory list model behind the scheduling view.
///
/// Holds the last fetched appointments plus the search and status inputs.
/// The filtered list is computed once per `(appointments, search_term,
/// status_filter)` combination and dropped whenever one of them changes.
#[derive(Debug, Default)]
pub struct AppointmentBoard {
    appointments: Vec<Appointment>,
    search_term: String,
    status_filter: StatusFilter,
    filtered: OnceCell<Vec<Appointment>>,
}

impl AppointmentBoard {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments,
            ..Self::default()
        }
    }

    /// Replaces the list with a fresh fetch. The last successful fetch wins.
    pub fn set_appointments(&mut self, appointments: Vec<Appointment>) {
        self.appointments = appointments;
        self.filtered = OnceCell::new();
    }

    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        let search_term = search_term.into();
        if search_term != self.search_term {
            self.search_term = search_term;
            self.filtered = OnceCell::new();
        }
    }

    pub fn set_status_filter(&mut self, status_filter: StatusFilter) {
        if status_filter != self.status_filter {
            self.status_filter = status_filter;
            self.filtered = OnceCell::new();
        }
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn filtered(&self) -> &[Appointment] {
        self.filtered.get_or_init(|| {
            filter_appointments(&self.appointments, &self.search_term, self.status_filter)
        })
    }

    /// Calendar events for the appointments that pass the current filters.
    pub fn calendar_events(&self) -> Vec<CalendarEvent> {
        to_calendar_events(self.filtered())
    }

    /// Queues are built from the whole list; search and status filters only
    /// narrow the list and the calendar.
    pub fn queues(&self, day: NaiveDate, offset: FixedOffset) -> QueueBoard {
        partition_queue(&self.appointments, day, offset)
    }

    pub fn view(&self, day: NaiveDate, offset: FixedOffset) -> BoardView {
        let appointments = self.filtered().to_vec();
        BoardView {
            calendar_events: to_calendar_events(&appointments),
            queue: self.queues(day, offset),
            total: self.appointments.len(),
            filtered: appointments.len(),
            appointments,
        }
    }

    #[cfg(test)]
    fn is_cached(&self) -> bool {
        self.filtered.get().is_some()
    }
}
