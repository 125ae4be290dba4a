use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppointmentData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_appointments_by_master(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiSuccess<Vec<AppointmentData>>, ApiError> {
    state
        .appointments
        .by_master(id)
        .await
        .map_err(ApiError::from)
        .map(|appointments| {
            ApiSuccess::new(
                StatusCode::OK,
                appointments.iter().map(AppointmentData::from).collect(),
            )
        })
}

/// Same view restricted to the next seven days.
pub async fn get_appointments_by_master_week(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiSuccess<Vec<AppointmentData>>, ApiError> {
    state
        .appointments
        .by_master_week(id)
        .await
        .map_err(ApiError::from)
        .map(|appointments| {
            ApiSuccess::new(
                StatusCode::OK,
                appointments.iter().map(AppointmentData::from).collect(),
            )
        })
}
