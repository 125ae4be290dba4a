use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::appointment::models::Appointment;

pub mod by_master;
pub mod create_appointment;
pub mod delete_appointment;
pub mod get_appointment;
pub mod list_appointments;

/// Appointment representation exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentData {
    pub id: i32,
    pub title: String,
    pub master_name: String,
    pub places: i32,
    pub client_name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub booking_time: DateTime<Utc>,
    pub master_id: i32,
}

impl From<&Appointment> for AppointmentData {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            title: appointment.title.clone(),
            master_name: appointment.master_name.clone(),
            places: appointment.places,
            client_name: appointment.client_name.clone(),
            description: appointment.description.clone(),
            duration_minutes: appointment.duration_minutes,
            booking_time: appointment.booking_time,
            master_id: appointment.master_id,
        }
    }
}
