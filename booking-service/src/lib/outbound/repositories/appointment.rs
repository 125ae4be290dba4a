use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::appointment::models::Appointment;
use crate::domain::appointment::models::AppointmentDraft;
use crate::domain::appointment::ports::AppointmentQueries;
use crate::domain::errors::StoreError;
use crate::domain::principal::ports::EntityRepository;

const COLUMNS: &str = "id, title, master_name, places, client_name, description, \
                       duration_minutes, booking_time, master_id";

pub struct PostgresAppointmentRepository {
    pool: PgPool,
}

impl PostgresAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AppointmentRow {
    id: i32,
    title: String,
    master_name: String,
    places: i32,
    client_name: Option<String>,
    description: Option<String>,
    duration_minutes: i32,
    booking_time: DateTime<Utc>,
    master_id: i32,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
            id: row.id,
            title: row.title,
            master_name: row.master_name,
            places: row.places,
            client_name: row.client_name,
            description: row.description,
            duration_minutes: row.duration_minutes,
            booking_time: row.booking_time,
            master_id: row.master_id,
        }
    }
}

fn store_error(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

#[async_trait]
impl EntityRepository<Appointment> for PostgresAppointmentRepository {
    async fn add(&self, draft: AppointmentDraft) -> Result<Appointment, StoreError> {
        let row = sqlx::query_as::<_, AppointmentRow>(&format!(
            r#"
            INSERT INTO appointments (title, master_name, places, client_name, description,
                                      duration_minutes, booking_time, master_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.master_name)
        .bind(draft.places)
        .bind(&draft.client_name)
        .bind(&draft.description)
        .bind(draft.duration_minutes)
        .bind(draft.booking_time)
        .bind(draft.master_id)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.into())
    }

    async fn get(&self) -> Result<Vec<Appointment>, StoreError> {
        let rows = sqlx::query_as::<_, AppointmentRow>(&format!(
            "SELECT {COLUMNS} FROM appointments ORDER BY booking_time"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Appointment>, StoreError> {
        let row = sqlx::query_as::<_, AppointmentRow>(&format!(
            "SELECT {COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(Appointment::from))
    }

    async fn update(&self, appointment: Appointment) -> Result<Appointment, StoreError> {
        let row = sqlx::query_as::<_, AppointmentRow>(&format!(
            r#"
            UPDATE appointments
            SET title = $2, master_name = $3, places = $4, client_name = $5, description = $6,
                duration_minutes = $7, booking_time = $8, master_id = $9
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(appointment.id)
        .bind(&appointment.title)
        .bind(&appointment.master_name)
        .bind(appointment.places)
        .bind(&appointment.client_name)
        .bind(&appointment.description)
        .bind(appointment.duration_minutes)
        .bind(appointment.booking_time)
        .bind(appointment.master_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(Appointment::from).ok_or(StoreError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl AppointmentQueries for PostgresAppointmentRepository {
    async fn by_master(&self, master_id: i32) -> Result<Vec<Appointment>, StoreError> {
        let rows = sqlx::query_as::<_, AppointmentRow>(&format!(
            "SELECT {COLUMNS} FROM appointments WHERE master_id = $1 ORDER BY booking_time"
        ))
        .bind(master_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(Appointment::from).collect())
    }
}
