// libs/doctor-cell/src/models.rs
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Day-of-week vocabulary used by the doctor schedules. The directory data
/// predates any localization layer, so the French names are the canonical
/// serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Lundi,
    Mardi,
    Mercredi,
    Jeudi,
    Vendredi,
    Samedi,
    Dimanche,
}

impl DayOfWeek {
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Lundi,
            Weekday::Tue => DayOfWeek::Mardi,
            Weekday::Wed => DayOfWeek::Mercredi,
            Weekday::Thu => DayOfWeek::Jeudi,
            Weekday::Fri => DayOfWeek::Vendredi,
            Weekday::Sat => DayOfWeek::Samedi,
            Weekday::Sun => DayOfWeek::Dimanche,
        }
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayOfWeek::Lundi => "Lundi",
            DayOfWeek::Mardi => "Mardi",
            DayOfWeek::Mercredi => "Mercredi",
            DayOfWeek::Jeudi => "Jeudi",
            DayOfWeek::Vendredi => "Vendredi",
            DayOfWeek::Samedi => "Samedi",
            DayOfWeek::Dimanche => "Dimanche",
        };
        write!(f, "{}", name)
    }
}

/// Read-only reference data. Doctors are never created or mutated through
/// this service; the directory is seeded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub full_name: String,
    pub specialty: String,
    pub city: String,
    pub address: String,
    pub phone: String,
    pub rating: f32,
    pub available_days: Vec<DayOfWeek>,
    /// Ordered "HH:MM" labels a patient can pick from.
    pub time_slots: Vec<String>,
    pub consultation_price: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorSearchFilters {
    pub specialty: Option<String>,
    pub city: Option<String>,
    /// Free-text match against the doctor's name.
    pub q: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Invalid doctor record: {0}")]
    InvalidRecord(String),
}

/// Checks the directory invariants: a non-empty slot list and well-formed
/// "HH:MM" labels.
pub fn validate_doctor(doctor: &Doctor) -> Result<(), DoctorError> {
    if doctor.time_slots.is_empty() {
        return Err(DoctorError::InvalidRecord(format!(
            "doctor {} has no time slots",
            doctor.full_name
        )));
    }
    for label in &doctor.time_slots {
        if !is_valid_slot_label(label) {
            return Err(DoctorError::InvalidRecord(format!(
                "doctor {} has malformed slot label '{}'",
                doctor.full_name, label
            )));
        }
    }
    Ok(())
}

/// A slot label is "HH:MM" on a 24-hour clock.
pub fn is_valid_slot_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let (hh, mm) = (&label[..2], &label[3..]);
    // `parse::<u32>` accepts a leading '+', so digits are checked first.
    if !hh.bytes().all(|b| b.is_ascii_digit()) || !mm.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match (hh.parse::<u32>(), mm.parse::<u32>()) {
        (Ok(h), Ok(m)) => h < 24 && m < 60,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_labels() {
        assert!(is_valid_slot_label("09:00"));
        assert!(is_valid_slot_label("23:59"));
        assert!(!is_valid_slot_label("9:00"));
        assert!(!is_valid_slot_label("24:00"));
        assert!(!is_valid_slot_label("09:60"));
        assert!(!is_valid_slot_label("0900"));
        // A sign would slip through a bare u32 parse.
        assert!(!is_valid_slot_label("+9:05"));
        assert!(!is_valid_slot_label("09:+5"));
    }

    #[test]
    fn day_of_week_from_date() {
        // 2025-01-06 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(DayOfWeek::of_date(monday), DayOfWeek::Lundi);
        assert_eq!(DayOfWeek::of_date(monday.succ_opt().unwrap()), DayOfWeek::Mardi);
    }
}
