// libs/booking-cell/src/services/wizard.rs
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use doctor_cell::models::Doctor;
use doctor_cell::services::availability::is_date_bookable;

use crate::models::{Appointment, AppointmentStatus, BookingError, PaymentForm};
use crate::services::reminder::ReminderService;
use crate::services::store::AppointmentStore;

/// Wizard steps in order. `Confirmed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SelectingSlot,
    Paying,
    Confirming,
    Confirmed,
}

impl WizardStep {
    pub fn index(&self) -> usize {
        match self {
            WizardStep::SelectingSlot => 0,
            WizardStep::Paying => 1,
            WizardStep::Confirming => 2,
            WizardStep::Confirmed => 3,
        }
    }
}

/// What a transition did.
#[derive(Debug)]
pub enum WizardOutcome {
    Moved(WizardStep),
    /// The session closed without booking anything; discard the wizard.
    Aborted,
    Committed {
        appointment: Appointment,
        reminder_at: Option<DateTime<Utc>>,
    },
}

/// Transient per-session state for the multi-step booking flow. Owned by
/// one session, discarded on close or commit; never merged with another
/// session's wizard.
pub struct BookingWizard {
    session_id: Uuid,
    patient_id: String,
    doctor: Doctor,
    appointment_type: String,
    notes: Option<String>,
    selected_date: Option<NaiveDate>,
    selected_time: Option<String>,
    payment: Option<PaymentForm>,
    step: WizardStep,
}

impl BookingWizard {
    pub fn open(
        patient_id: String,
        doctor: Doctor,
        appointment_type: String,
        notes: Option<String>,
    ) -> Self {
        debug!(
            "Opening booking session for patient {} with {}",
            patient_id, doctor.full_name
        );
        Self {
            session_id: Uuid::new_v4(),
            patient_id,
            doctor,
            appointment_type,
            notes,
            selected_date: None,
            selected_time: None,
            payment: None,
            step: WizardStep::SelectingSlot,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    /// Selections are only accepted while the slot step is (or is again)
    /// the current step.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        self.require_step(WizardStep::SelectingSlot)?;
        self.selected_date = Some(date);
        Ok(())
    }

    pub fn select_time(&mut self, time: String) -> Result<(), BookingError> {
        self.require_step(WizardStep::SelectingSlot)?;
        self.selected_time = Some(time);
        Ok(())
    }

    pub fn set_payment(&mut self, payment: PaymentForm) -> Result<(), BookingError> {
        self.require_step(WizardStep::Paying)?;
        self.payment = Some(payment);
        Ok(())
    }

    /// Advance one step. On a validation failure the step does not move and
    /// the error carries the user-facing message. Advancing from the
    /// confirmation step commits: exactly one confirmed appointment is
    /// appended to the store and a reminder timestamp is computed.
    pub fn next(
        &mut self,
        store: &mut AppointmentStore,
        today: NaiveDate,
        reminder_offset_hours: i64,
    ) -> Result<WizardOutcome, BookingError> {
        match self.step {
            WizardStep::SelectingSlot => {
                self.validate_slot_selection(today)?;
                self.step = WizardStep::Paying;
                Ok(WizardOutcome::Moved(self.step))
            }
            WizardStep::Paying => {
                let payment = self
                    .payment
                    .as_ref()
                    .ok_or_else(|| BookingError::Validation("Payment details are required".to_string()))?;
                payment.validate(today).map_err(BookingError::Validation)?;
                self.step = WizardStep::Confirming;
                Ok(WizardOutcome::Moved(self.step))
            }
            WizardStep::Confirming => {
                let appointment = self.commit(store, reminder_offset_hours)?;
                Ok(appointment)
            }
            WizardStep::Confirmed => Err(BookingError::Validation(
                "Booking session is already confirmed".to_string(),
            )),
        }
    }

    /// Step back. From the first step the whole session aborts and no
    /// partial state survives.
    pub fn back(&mut self) -> WizardOutcome {
        match self.step {
            WizardStep::SelectingSlot => WizardOutcome::Aborted,
            WizardStep::Paying => {
                self.step = WizardStep::SelectingSlot;
                WizardOutcome::Moved(self.step)
            }
            WizardStep::Confirming => {
                self.step = WizardStep::Paying;
                WizardOutcome::Moved(self.step)
            }
            // Nothing to go back to once committed.
            WizardStep::Confirmed => WizardOutcome::Aborted,
        }
    }

    fn validate_slot_selection(&self, today: NaiveDate) -> Result<(), BookingError> {
        let date = self.selected_date.ok_or_else(|| {
            BookingError::Validation("Please select a date and a time slot".to_string())
        })?;
        let time = self.selected_time.as_ref().ok_or_else(|| {
            BookingError::Validation("Please select a date and a time slot".to_string())
        })?;

        if !is_date_bookable(Some(&self.doctor), date, today) {
            return Err(BookingError::Validation(
                "Selected date is not available for this doctor".to_string(),
            ));
        }

        if !self.doctor.time_slots.contains(time) {
            return Err(BookingError::Validation(
                "Selected time slot is not offered by this doctor".to_string(),
            ));
        }

        Ok(())
    }

    fn commit(
        &mut self,
        store: &mut AppointmentStore,
        reminder_offset_hours: i64,
    ) -> Result<WizardOutcome, BookingError> {
        // Both selections were validated on the way into the payment step.
        let date = self
            .selected_date
            .ok_or_else(|| BookingError::Validation("No date selected".to_string()))?;
        let time = self
            .selected_time
            .clone()
            .ok_or_else(|| BookingError::Validation("No time selected".to_string()))?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: self.patient_id.clone(),
            doctor_id: self.doctor.id,
            doctor_name: self.doctor.full_name.clone(),
            specialty: self.doctor.specialty.clone(),
            date,
            time: time.clone(),
            status: AppointmentStatus::Confirmed,
            appointment_type: self.appointment_type.clone(),
            notes: self.notes.clone(),
            rescheduled: false,
            created_at: Utc::now(),
        };

        // Booking keeps its mutation in memory for the session lifetime;
        // only the reschedule flow writes through to the sink.
        store.upsert(appointment.clone());

        let reminder_at = ReminderService::schedule_reminder(
            appointment.id,
            appointment.date,
            &appointment.time,
            reminder_offset_hours,
        );

        self.step = WizardStep::Confirmed;
        info!(
            "Appointment {} booked with {} on {} {}",
            appointment.id, appointment.doctor_name, appointment.date, appointment.time
        );

        Ok(WizardOutcome::Committed { appointment, reminder_at })
    }

    fn require_step(&self, expected: WizardStep) -> Result<(), BookingError> {
        if self.step != expected {
            return Err(BookingError::Validation(format!(
                "Action not available at this step ({:?})",
                self.step
            )));
        }
        Ok(())
    }
}
