// libs/doctor-cell/src/services/availability.rs
use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::models::{DayOfWeek, Doctor};

/// Maximum days scanned when looking for the next bookable date. Every
/// doctor with at least one working day matches within one week; two gives
/// headroom without an unbounded scan.
const NEXT_BOOKABLE_SCAN_DAYS: i64 = 14;

/// Decides whether `date` can be booked with `doctor`, judged against
/// `today`'s calendar day (time of day ignored, same-day bookable).
///
/// Pure and total: no doctor means no booking, past dates and non-working
/// weekdays are rejected, nothing errors.
pub fn is_date_bookable(doctor: Option<&Doctor>, date: NaiveDate, today: NaiveDate) -> bool {
    let Some(doctor) = doctor else {
        return false;
    };

    if date < today {
        return false;
    }

    doctor.available_days.contains(&DayOfWeek::of_date(date))
}

/// First date on or after `today` that falls on one of the doctor's working
/// days. `None` when the schedule has no working day at all.
pub fn next_bookable_date(doctor: &Doctor, today: NaiveDate) -> Option<NaiveDate> {
    (0..NEXT_BOOKABLE_SCAN_DAYS)
        .map(|offset| today + Duration::days(offset))
        .find(|candidate| is_date_bookable(Some(doctor), *candidate, today))
}

/// The doctor's slot labels minus those already taken on `date`.
/// `booked` holds the "HH:MM" labels of non-cancelled appointments for this
/// doctor on that date; the caller assembles it from the appointment store.
pub fn free_slots(doctor: &Doctor, date: NaiveDate, today: NaiveDate, booked: &[String]) -> Vec<String> {
    if !is_date_bookable(Some(doctor), date, today) {
        return Vec::new();
    }

    let free: Vec<String> = doctor
        .time_slots
        .iter()
        .filter(|&slot| !booked.contains(slot))
        .cloned()
        .collect();

    debug!(
        "{} free slots for {} on {} ({} booked)",
        free.len(),
        doctor.full_name,
        date,
        booked.len()
    );
    free
}
