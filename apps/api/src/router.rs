use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::router::{appointment_routes, booking_routes};
use booking_cell::state::AppState;
use doctor_cell::router::doctor_routes;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "medirdv API is running!" }))
        .nest("/doctors", doctor_routes(state.directory.clone()))
        .nest("/bookings", booking_routes(state.clone()))
        .nest("/appointments", appointment_routes(state))
}
