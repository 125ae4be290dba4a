use chrono::DateTime;
use chrono::Utc;

use crate::domain::principal::ports::Entity;

/// A booking slot with a master.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
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

/// Appointment fields before the store assigns an id.
#[derive(Debug, Clone)]
pub struct AppointmentDraft {
    pub title: String,
    pub master_name: String,
    pub places: i32,
    pub client_name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub booking_time: DateTime<Utc>,
    pub master_id: i32,
}

impl Entity for Appointment {
    type Draft = AppointmentDraft;

    fn id(&self) -> i32 {
        self.id
    }
}
