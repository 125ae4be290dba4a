use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppointmentData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiSuccess<AppointmentData>, ApiError> {
    state
        .appointments
        .get(id)
        .await
        .map_err(ApiError::from)
        .map(|ref appointment| ApiSuccess::new(StatusCode::OK, appointment.into()))
}
