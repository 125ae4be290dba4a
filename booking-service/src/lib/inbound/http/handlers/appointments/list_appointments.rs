use axum::extract::State;
use axum::http::StatusCode;

use super::AppointmentData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_appointments(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<AppointmentData>>, ApiError> {
    state
        .appointments
        .list()
        .await
        .map_err(ApiError::from)
        .map(|appointments| {
            ApiSuccess::new(
                StatusCode::OK,
                appointments.iter().map(AppointmentData::from).collect(),
            )
        })
}
