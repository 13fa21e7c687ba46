use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::models::{Appointment, AppointmentStatus, QueueBoard};

/// Offset used to decide which calendar day an appointment falls on.
/// Out of range values fall back to UTC.
pub fn clinic_offset(utc_offset_minutes: i32) -> FixedOffset {
    utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

pub fn clinic_today(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

fn is_on_day(appointment: &Appointment, day: NaiveDate, offset: FixedOffset) -> bool {
    appointment.scheduled_datetime.with_timezone(&offset).date_naive() == day
}

/// Splits the day's appointments into the waiting room (checked in or in
/// consultation, consultations first) and the ones still to be checked in.
/// Completed, cancelled and unrecognised appointments land in neither.
pub fn partition_queue(appointments: &[Appointment], day: NaiveDate, offset: FixedOffset) -> QueueBoard {
    let mut board = QueueBoard::default();

    for appointment in appointments.iter().filter(|a| is_on_day(a, day, offset)) {
        match appointment.status {
            AppointmentStatus::CheckedIn | AppointmentStatus::InConsultation => {
                board.waiting.push(appointment.clone())
            }
            AppointmentStatus::Scheduled => board.schedulable.push(appointment.clone()),
            AppointmentStatus::Completed
            | AppointmentStatus::Cancelled
            | AppointmentStatus::Unknown => {}
        }
    }

    board.waiting.sort_by_key(|a| {
        (
            a.status != AppointmentStatus::InConsultation,
            a.scheduled_datetime,
            a.id,
        )
    });
    board.schedulable.sort_by_key(|a| (a.scheduled_datetime, a.id));

    board
}
