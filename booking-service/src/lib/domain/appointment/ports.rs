use async_trait::async_trait;

use crate::domain::appointment::models::Appointment;
use crate::domain::errors::StoreError;

/// Appointment lookups beyond the generic repository surface.
#[async_trait]
pub trait AppointmentQueries: Send + Sync + 'static {
    /// All appointments booked with the given master.
    async fn by_master(&self, master_id: i32) -> Result<Vec<Appointment>, StoreError>;
}
