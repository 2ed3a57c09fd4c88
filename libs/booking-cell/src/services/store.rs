// libs/booking-cell/src/services/store.rs
use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use shared_storage::{load_collection, store_collection, CollectionStore};

use crate::models::{Appointment, AppointmentStatus, BookingError};

pub const APPOINTMENTS_COLLECTION: &str = "appointments";

/// The single mutable appointment collection. All mutations are in-memory;
/// callers that are write-through invoke `persist()` explicitly, so each
/// workflow's persistence behavior is visible at its call site.
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
    sink: Box<dyn CollectionStore>,
}

impl AppointmentStore {
    /// Hydrates from whatever the sink last saw for the collection.
    pub fn open(sink: Box<dyn CollectionStore>) -> Result<Self, BookingError> {
        let appointments = load_collection(sink.as_ref(), APPOINTMENTS_COLLECTION)
            .map_err(|e| BookingError::Storage(e.to_string()))?;
        debug!("Appointment store hydrated with {} records", appointments.len());
        Ok(Self { appointments, sink })
    }

    pub fn list(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn get(&self, id: Uuid) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn for_patient(&self, patient_id: &str) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect()
    }

    pub fn for_doctor(&self, doctor_id: Uuid) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect()
    }

    /// Slot labels already taken for a doctor on a date. Cancelled
    /// appointments free their slot.
    pub fn booked_slots(&self, doctor_id: Uuid, date: NaiveDate) -> Vec<String> {
        self.appointments
            .iter()
            .filter(|a| {
                a.doctor_id == doctor_id
                    && a.date == date
                    && a.status != AppointmentStatus::Cancelled
            })
            .map(|a| a.time.clone())
            .collect()
    }

    /// Insert or replace by id.
    pub fn upsert(&mut self, appointment: Appointment) {
        match self.appointments.iter_mut().find(|a| a.id == appointment.id) {
            Some(existing) => *existing = appointment,
            None => self.appointments.push(appointment),
        }
    }

    /// Unconditional status change: no transition guard lives here. Gating
    /// is button-level, enforced by the callers that render the buttons
    /// (see `services::lifecycle`). Cancellation is a status change, never
    /// a removal.
    pub fn change_status(
        &mut self,
        id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, BookingError> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(BookingError::NotFound)?;

        debug!("Appointment {} status: {} -> {}", id, appointment.status, new_status);
        appointment.status = new_status;
        Ok(appointment.clone())
    }

    /// Resolve an appointment for rescheduling: by id first, then by the
    /// inherited (doctor name, original time) secondary match. The fallback
    /// may mask data bugs, so it is logged loudly rather than treated as a
    /// normal hit.
    pub fn find_for_reschedule(
        &self,
        id: Uuid,
        doctor_name: Option<&str>,
        original_time: Option<&str>,
    ) -> Option<&Appointment> {
        if let Some(appointment) = self.get(id) {
            return Some(appointment);
        }

        if let (Some(name), Some(time)) = (doctor_name, original_time) {
            if let Some(appointment) = self
                .appointments
                .iter()
                .find(|a| a.doctor_name == name && a.time == time)
            {
                warn!(
                    "Appointment {} not found by id; using fallback match by doctor '{}' and time '{}' (appointment {})",
                    id, name, time, appointment.id
                );
                return Some(appointment);
            }
        }

        None
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Appointment> {
        self.appointments.iter_mut().find(|a| a.id == id)
    }

    /// Write the whole collection through to the sink.
    pub fn persist(&mut self) -> Result<(), BookingError> {
        store_collection(self.sink.as_mut(), APPOINTMENTS_COLLECTION, &self.appointments)
            .map_err(|e| BookingError::Storage(e.to_string()))
    }
}
