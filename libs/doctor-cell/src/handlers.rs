// libs/doctor-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::directory::DoctorDirectory;
use crate::models::DoctorSearchFilters;

#[axum::debug_handler]
pub async fn search_doctors(
    State(directory): State<Arc<DoctorDirectory>>,
    Query(filters): Query<DoctorSearchFilters>,
) -> Result<Json<Value>, AppError> {
    let doctors = directory.search(&filters);
    let count = doctors.len();

    Ok(Json(json!({
        "success": true,
        "doctors": doctors,
        "count": count
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(directory): State<Arc<DoctorDirectory>>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let doctor = directory
        .get(doctor_id)
        .ok_or_else(|| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor
    })))
}
