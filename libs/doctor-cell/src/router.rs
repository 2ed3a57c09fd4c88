// libs/doctor-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use crate::directory::DoctorDirectory;
use crate::handlers;

/// Directory listing is public: patients browse doctors before they have a
/// session, so no auth middleware is layered here.
pub fn doctor_routes(directory: Arc<DoctorDirectory>) -> Router {
    Router::new()
        .route("/", get(handlers::search_doctors))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .with_state(directory)
}
