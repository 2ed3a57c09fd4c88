// libs/booking-cell/src/services/reminder.rs
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

/// Appointment date-time minus the offset. Pure computation; `None` when
/// the slot label does not parse.
pub fn reminder_at(date: NaiveDate, time: &str, offset_hours: i64) -> Option<DateTime<Utc>> {
    let time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    Some((date.and_time(time) - Duration::hours(offset_hours)).and_utc())
}

/// There is no delivery channel behind this: the computed timestamp is
/// logged and returned for the caller to act on. Nothing is queued or
/// persisted.
pub struct ReminderService;

impl ReminderService {
    pub fn schedule_reminder(
        appointment_id: Uuid,
        date: NaiveDate,
        time: &str,
        offset_hours: i64,
    ) -> Option<DateTime<Utc>> {
        match reminder_at(date, time, offset_hours) {
            Some(timestamp) => {
                info!(
                    "Reminder for appointment {} computed at {} ({}h before {} {})",
                    appointment_id, timestamp, offset_hours, date, time
                );
                Some(timestamp)
            }
            None => {
                warn!(
                    "Could not compute reminder for appointment {}: unparseable time '{}'",
                    appointment_id, time
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_is_offset_before_the_slot() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let at = reminder_at(date, "09:00", 2).unwrap();
        assert_eq!(at, date.and_hms_opt(7, 0, 0).unwrap().and_utc());
    }

    #[test]
    fn reminder_crosses_midnight() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let at = reminder_at(date, "01:00", 2).unwrap();
        let previous_day = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(at, previous_day.and_hms_opt(23, 0, 0).unwrap().and_utc());
    }

    #[test]
    fn bad_label_yields_none() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(reminder_at(date, "morning", 2).is_none());
    }
}
