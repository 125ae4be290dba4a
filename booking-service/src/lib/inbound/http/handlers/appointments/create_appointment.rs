use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::AppointmentData;
use crate::domain::appointment::models::AppointmentDraft;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_appointment(
    State(state): State<AppState>,
    Json(body): Json<CreateAppointmentRequest>,
) -> Result<ApiSuccess<AppointmentData>, ApiError> {
    state
        .appointments
        .create(body.into_draft())
        .await
        .map_err(ApiError::from)
        .map(|ref appointment| ApiSuccess::new(StatusCode::CREATED, appointment.into()))
}

/// HTTP request body for creating an appointment (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAppointmentRequest {
    title: String,
    master_name: String,
    places: i32,
    client_name: Option<String>,
    description: Option<String>,
    duration_minutes: i32,
    booking_time: DateTime<Utc>,
    master_id: i32,
}

impl CreateAppointmentRequest {
    fn into_draft(self) -> AppointmentDraft {
        AppointmentDraft {
            title: self.title,
            master_name: self.master_name,
            places: self.places,
            client_name: self.client_name,
            description: self.description,
            duration_minutes: self.duration_minutes,
            booking_time: self.booking_time,
            master_id: self.master_id,
        }
    }
}
