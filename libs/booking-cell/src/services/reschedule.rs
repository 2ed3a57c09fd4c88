// libs/booking-cell/src/services/reschedule.rs
use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use doctor_cell::models::is_valid_slot_label;
use shared_models::auth::User;

use crate::models::{Appointment, BookingError, RescheduleRequest};
use crate::services::reminder::ReminderService;
use crate::services::store::AppointmentStore;

/// In-place date/time change for an existing appointment. Identity and
/// status are preserved; only `date`, `time` and the `rescheduled` marker
/// move.
pub struct RescheduleService {
    /// This flow writes the collection through to the sink on success,
    /// unlike booking and status changes which stay session-only.
    pub write_through: bool,
    pub reminder_offset_hours: i64,
}

impl RescheduleService {
    pub fn new(reminder_offset_hours: i64) -> Self {
        Self { write_through: true, reminder_offset_hours }
    }

    pub fn reschedule(
        &self,
        store: &mut AppointmentStore,
        appointment_id: Uuid,
        request: RescheduleRequest,
        acting_user: &User,
        today: NaiveDate,
    ) -> Result<(Appointment, Option<DateTime<Utc>>), BookingError> {
        // Both fields are required; nothing mutates on a validation failure.
        let (Some(new_date), Some(new_time)) = (request.new_date, request.new_time.clone()) else {
            return Err(BookingError::Validation(
                "Both a new date and a new time are required".to_string(),
            ));
        };

        // Date-only rule: not in the past. The doctor is already fixed for
        // this appointment, so no working-day check applies here. Looser
        // than the booking validator, intentionally.
        if new_date < today {
            return Err(BookingError::Validation(
                "Cannot reschedule to a past date".to_string(),
            ));
        }

        if !is_valid_slot_label(&new_time) {
            return Err(BookingError::Validation(
                "Time must be an HH:MM label".to_string(),
            ));
        }

        let target_id = store
            .find_for_reschedule(
                appointment_id,
                request.doctor_name.as_deref(),
                request.original_time.as_deref(),
            )
            .ok_or(BookingError::NotFound)?
            .id;

        // Patients may only move their own appointments. Doctor-side views
        // gate by which buttons they render, so the doctor role passes.
        if acting_user.is_patient() {
            let owner = &store.get(target_id).ok_or(BookingError::NotFound)?.patient_id;
            if owner != &acting_user.id {
                return Err(BookingError::Unauthorized);
            }
        }

        let appointment = store.get_mut(target_id).ok_or(BookingError::NotFound)?;
        appointment.date = new_date;
        appointment.time = new_time;
        appointment.rescheduled = true;
        let updated = appointment.clone();

        if self.write_through {
            store.persist()?;
        }

        let reminder_at = ReminderService::schedule_reminder(
            updated.id,
            updated.date,
            &updated.time,
            self.reminder_offset_hours,
        );

        info!(
            "Appointment {} rescheduled to {} {} (status unchanged: {})",
            updated.id, updated.date, updated.time, updated.status
        );

        Ok((updated, reminder_at))
    }
}
