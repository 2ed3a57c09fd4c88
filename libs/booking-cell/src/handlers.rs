// libs/booking-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use doctor_cell::services::availability::{free_slots, is_date_bookable, next_bookable_date};
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{
    AvailabilityQuery, BookingError, OpenBookingRequest, PaymentForm, RescheduleRequest,
    SelectSlotRequest, StatusChangeRequest,
};
use crate::services::lifecycle::{allowed_transitions, can_apply};
use crate::services::reschedule::RescheduleService;
use crate::services::wizard::{BookingWizard, WizardOutcome};
use crate::state::AppState;

fn booking_error(e: BookingError) -> AppError {
    match e {
        BookingError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        BookingError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        BookingError::SessionNotFound => AppError::NotFound("Booking session not found".to_string()),
        BookingError::Validation(msg) => AppError::BadRequest(msg),
        BookingError::Unauthorized => {
            AppError::Auth("Not authorized to access this appointment".to_string())
        }
        BookingError::Storage(msg) => AppError::Internal(msg),
    }
}

// ==============================================================================
// BOOKING WIZARD HANDLERS
// ==============================================================================

/// Open a booking session. A patient has at most one live wizard: opening
/// a session for another doctor discards the previous one.
#[axum::debug_handler]
pub async fn open_booking(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(request): Json<OpenBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let doctor = state
        .directory
        .get(request.doctor_id)
        .ok_or_else(|| booking_error(BookingError::DoctorNotFound))?
        .clone();

    let wizard = BookingWizard::open(
        user.id.clone(),
        doctor,
        request.appointment_type,
        request.notes,
    );
    let session_id = wizard.session_id();

    let mut sessions = state.sessions.write().await;
    sessions.retain(|_, w| w.patient_id() != user.id);
    sessions.insert(session_id, wizard);

    Ok(Json(json!({
        "success": true,
        "session_id": session_id,
        "step": "selecting_slot"
    })))
}

#[axum::debug_handler]
pub async fn select_slot(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Extension(user): Extension<User>,
    Json(request): Json<SelectSlotRequest>,
) -> Result<Json<Value>, AppError> {
    let mut sessions = state.sessions.write().await;
    let wizard = owned_session(&mut sessions, session_id, &user)?;

    if let Some(date) = request.date {
        wizard.select_date(date).map_err(booking_error)?;
    }
    if let Some(time) = request.time {
        wizard.select_time(time).map_err(booking_error)?;
    }

    Ok(Json(json!({
        "success": true,
        "session_id": session_id,
        "selected_date": wizard.selected_date(),
        "selected_time": wizard.selected_time()
    })))
}

#[axum::debug_handler]
pub async fn submit_payment(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Extension(user): Extension<User>,
    Json(payment): Json<PaymentForm>,
) -> Result<Json<Value>, AppError> {
    let mut sessions = state.sessions.write().await;
    let wizard = owned_session(&mut sessions, session_id, &user)?;

    wizard.set_payment(payment).map_err(booking_error)?;

    Ok(Json(json!({
        "success": true,
        "session_id": session_id
    })))
}

#[axum::debug_handler]
pub async fn advance_booking(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let today = Utc::now().date_naive();
    let offset = state.config.reminder_offset_hours;

    let mut sessions = state.sessions.write().await;
    let mut store = state.store.write().await;
    let wizard = owned_session(&mut sessions, session_id, &user)?;

    let outcome = wizard.next(&mut store, today, offset).map_err(booking_error)?;

    match outcome {
        WizardOutcome::Moved(step) => Ok(Json(json!({
            "success": true,
            "session_id": session_id,
            "step": step
        }))),
        WizardOutcome::Committed { appointment, reminder_at } => {
            // The session is done once the booking exists.
            sessions.remove(&session_id);
            Ok(Json(json!({
                "success": true,
                "appointment": appointment,
                "reminder_at": reminder_at,
                "message": "Appointment booked successfully"
            })))
        }
        WizardOutcome::Aborted => {
            sessions.remove(&session_id);
            Ok(Json(json!({
                "success": true,
                "session_closed": true
            })))
        }
    }
}

#[axum::debug_handler]
pub async fn retreat_booking(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let mut sessions = state.sessions.write().await;
    let wizard = owned_session(&mut sessions, session_id, &user)?;

    match wizard.back() {
        WizardOutcome::Moved(step) => Ok(Json(json!({
            "success": true,
            "session_id": session_id,
            "step": step
        }))),
        _ => {
            sessions.remove(&session_id);
            Ok(Json(json!({
                "success": true,
                "session_closed": true
            })))
        }
    }
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let mut sessions = state.sessions.write().await;
    owned_session(&mut sessions, session_id, &user)?;
    sessions.remove(&session_id);

    Ok(Json(json!({
        "success": true,
        "session_closed": true
    })))
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let store = state.store.read().await;

    let appointments = if user.is_doctor() {
        let doctor_id = Uuid::parse_str(&user.id)
            .map_err(|_| AppError::BadRequest("Doctor identity is not a valid id".to_string()))?;
        store.for_doctor(doctor_id)
    } else {
        store.for_patient(&user.id)
    };

    let count = appointments.len();
    Ok(Json(json!({
        "success": true,
        "appointments": appointments,
        "count": count
    })))
}

#[axum::debug_handler]
pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, AppError> {
    let doctor = state
        .directory
        .get(query.doctor_id)
        .ok_or_else(|| booking_error(BookingError::DoctorNotFound))?;

    let today = Utc::now().date_naive();
    let store = state.store.read().await;
    let booked = store.booked_slots(query.doctor_id, query.date);

    Ok(Json(json!({
        "success": true,
        "bookable": is_date_bookable(Some(doctor), query.date, today),
        "free_slots": free_slots(doctor, query.date, today, &booked),
        "next_bookable_date": next_bookable_date(doctor, today)
    })))
}

#[axum::debug_handler]
pub async fn reschedule_appointment(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
    Json(request): Json<RescheduleRequest>,
) -> Result<Json<Value>, AppError> {
    let today = Utc::now().date_naive();
    let service = RescheduleService::new(state.config.reminder_offset_hours);

    let mut store = state.store.write().await;
    let (appointment, reminder_at) = service
        .reschedule(&mut store, appointment_id, request, &user, today)
        .map_err(booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "reminder_at": reminder_at,
        "message": "Appointment rescheduled"
    })))
}

/// Status changes are gated exactly the way the views gate their buttons;
/// the store applies whatever passes the gate. This flow does not write
/// through to the sink.
#[axum::debug_handler]
pub async fn change_status(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
    Json(request): Json<StatusChangeRequest>,
) -> Result<Json<Value>, AppError> {
    let role = user.role.as_deref().unwrap_or("");

    let mut store = state.store.write().await;
    let current = store
        .get(appointment_id)
        .ok_or_else(|| booking_error(BookingError::NotFound))?;

    if user.is_patient() && current.patient_id != user.id {
        return Err(booking_error(BookingError::Unauthorized));
    }

    if !can_apply(role, &current.status, &request.status) {
        return Err(AppError::BadRequest(format!(
            "Cannot change a {} appointment to {} (allowed: {:?})",
            current.status,
            request.status,
            allowed_transitions(role, &current.status)
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
        )));
    }

    let appointment = store
        .change_status(appointment_id, request.status)
        .map_err(booking_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

fn owned_session<'a>(
    sessions: &'a mut std::collections::HashMap<Uuid, BookingWizard>,
    session_id: Uuid,
    user: &User,
) -> Result<&'a mut BookingWizard, AppError> {
    let wizard = sessions
        .get_mut(&session_id)
        .ok_or_else(|| booking_error(BookingError::SessionNotFound))?;

    if wizard.patient_id() != user.id {
        return Err(AppError::Auth("Not authorized for this booking session".to_string()));
    }

    Ok(wizard)
}
