// libs/booking-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::state::AppState;

/// Booking wizard session routes. Everything requires an identity.
pub fn booking_routes(state: Arc<AppState>) -> Router {
    let config = Arc::new(state.config.clone());

    let protected_routes = Router::new()
        .route("/", post(handlers::open_booking))
        .route("/{session_id}/select", post(handlers::select_slot))
        .route("/{session_id}/payment", post(handlers::submit_payment))
        .route("/{session_id}/next", post(handlers::advance_booking))
        .route("/{session_id}/back", post(handlers::retreat_booking))
        .route("/{session_id}", delete(handlers::cancel_booking))
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}

/// Appointment listing, availability, reschedule and status changes.
pub fn appointment_routes(state: Arc<AppState>) -> Router {
    let config = Arc::new(state.config.clone());

    let protected_routes = Router::new()
        .route("/", get(handlers::list_appointments))
        .route("/availability", get(handlers::check_availability))
        .route("/{appointment_id}/reschedule", patch(handlers::reschedule_appointment))
        .route("/{appointment_id}/status", post(handlers::change_status))
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}
