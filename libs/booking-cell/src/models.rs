// libs/booking-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: String,
    pub doctor_id: Uuid,
    // Denormalized for listing views; the directory stays the source of truth.
    pub doctor_name: String,
    pub specialty: String,
    pub date: NaiveDate,
    /// "HH:MM" slot label.
    pub time: String,
    pub status: AppointmentStatus,
    pub appointment_type: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub rescheduled: bool,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Completed or cancelled appointments are "past" regardless of their
    /// calendar date.
    pub fn is_past(&self, today: NaiveDate) -> bool {
        matches!(
            self.status,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        ) || self.date < today
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// ==============================================================================
// PAYMENT FORM
// ==============================================================================

/// The wizard's payment step. Validation only; no charge is ever made.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentForm {
    pub card_number: String,
    pub card_holder: String,
    /// "MM/YY"
    pub expiry: String,
    pub cvv: String,
}

impl PaymentForm {
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        let digits: String = self.card_number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err("Card number must be 16 digits".to_string());
        }

        if self.card_holder.trim().is_empty() {
            return Err("Card holder name is required".to_string());
        }

        let (month, year) = parse_expiry(&self.expiry)
            .ok_or_else(|| "Expiry must be in MM/YY format".to_string())?;
        if (year, month) < (today.year(), today.month()) {
            return Err("Card expiry date is in the past".to_string());
        }

        if !(3..=4).contains(&self.cvv.len()) || !self.cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err("CVV must be 3 or 4 digits".to_string());
        }

        Ok(())
    }
}

fn parse_expiry(expiry: &str) -> Option<(u32, i32)> {
    let (mm, yy) = expiry.split_once('/')?;
    let month: u32 = mm.parse().ok()?;
    let year: i32 = yy.parse().ok()?;
    if !(1..=12).contains(&month) || yy.len() != 2 {
        return None;
    }
    Some((month, 2000 + year))
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct OpenBookingRequest {
    pub doctor_id: Uuid,
    pub appointment_type: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectSlotRequest {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RescheduleRequest {
    pub new_date: Option<NaiveDate>,
    pub new_time: Option<String>,
    /// Secondary match keys used when the id lookup misses (see the
    /// reschedule service). Listing views that predate stable ids still
    /// send these.
    pub doctor_name: Option<String>,
    pub original_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusChangeRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Booking session not found")]
    SessionNotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized access to appointment")]
    Unauthorized,

    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(number: &str, expiry: &str, cvv: &str) -> PaymentForm {
        PaymentForm {
            card_number: number.to_string(),
            card_holder: "Jean Dupont".to_string(),
            expiry: expiry.to_string(),
            cvv: cvv.to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn valid_payment_form_passes() {
        assert!(form("4242 4242 4242 4242", "12/27", "123").validate(today()).is_ok());
        assert!(form("4242424242424242", "06/25", "1234").validate(today()).is_ok());
    }

    #[test]
    fn short_card_number_fails() {
        assert!(form("4242 4242 4242 424", "12/27", "123").validate(today()).is_err());
    }

    #[test]
    fn past_expiry_fails() {
        assert!(form("4242424242424242", "05/25", "123").validate(today()).is_err());
        assert!(form("4242424242424242", "12/24", "123").validate(today()).is_err());
    }

    #[test]
    fn current_month_expiry_passes() {
        assert!(form("4242424242424242", "06/25", "123").validate(today()).is_ok());
    }

    #[test]
    fn short_cvv_fails() {
        assert!(form("4242424242424242", "12/27", "12").validate(today()).is_err());
    }

    #[test]
    fn malformed_expiry_fails() {
        assert!(form("4242424242424242", "13/27", "123").validate(today()).is_err());
        assert!(form("4242424242424242", "1227", "123").validate(today()).is_err());
    }

    #[test]
    fn completed_and_cancelled_are_past_regardless_of_date() {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: "p1".into(),
            doctor_id: Uuid::from_u128(1),
            doctor_name: "Dr. X".into(),
            specialty: "Cardiologie".into(),
            date: today() + chrono::Duration::days(30),
            time: "09:00".into(),
            status: AppointmentStatus::Completed,
            appointment_type: "Consultation".into(),
            notes: None,
            rescheduled: false,
            created_at: Utc::now(),
        };
        assert!(appointment.is_past(today()));

        let cancelled = Appointment { status: AppointmentStatus::Cancelled, ..appointment.clone() };
        assert!(cancelled.is_past(today()));

        let upcoming = Appointment { status: AppointmentStatus::Confirmed, ..appointment };
        assert!(!upcoming.is_past(today()));
    }
}
