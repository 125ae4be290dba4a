use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;

use crate::domain::appointment::models::Appointment;
use crate::domain::appointment::models::AppointmentDraft;
use crate::domain::appointment::ports::AppointmentQueries;
use crate::domain::errors::StoreError;
use crate::domain::principal::ports::EntityRepository;

/// Booking-record operations over the generic repository.
pub struct AppointmentService<R, Q>
where
    R: EntityRepository<Appointment>,
    Q: AppointmentQueries,
{
    repository: Arc<R>,
    queries: Arc<Q>,
}

impl<R, Q> AppointmentService<R, Q>
where
    R: EntityRepository<Appointment>,
    Q: AppointmentQueries,
{
    pub fn new(repository: Arc<R>, queries: Arc<Q>) -> Self {
        Self { repository, queries }
    }

    pub async fn create(&self, draft: AppointmentDraft) -> Result<Appointment, StoreError> {
        let created = self.repository.add(draft).await?;
        tracing::info!(id = created.id, title = %created.title, "Appointment created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        self.repository.get().await
    }

    pub async fn get(&self, id: i32) -> Result<Appointment, StoreError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    pub async fn by_master(&self, master_id: i32) -> Result<Vec<Appointment>, StoreError> {
        self.queries.by_master(master_id).await
    }

    /// The master's bookings within the next seven days, by wall clock.
    pub async fn by_master_week(&self, master_id: i32) -> Result<Vec<Appointment>, StoreError> {
        let now = Utc::now();
        let horizon = now + Duration::days(7);

        let appointments = self.queries.by_master(master_id).await?;
        Ok(appointments
            .into_iter()
            .filter(|a| a.booking_time >= now && a.booking_time <= horizon)
            .collect())
    }

    pub async fn delete(&self, id: i32) -> Result<(), StoreError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestAppointmentRepository {}

        #[async_trait]
        impl EntityRepository<Appointment> for TestAppointmentRepository {
            async fn add(&self, draft: AppointmentDraft) -> Result<Appointment, StoreError>;
            async fn get(&self) -> Result<Vec<Appointment>, StoreError>;
            async fn get_by_id(&self, id: i32) -> Result<Option<Appointment>, StoreError>;
            async fn update(&self, entity: Appointment) -> Result<Appointment, StoreError>;
            async fn delete(&self, id: i32) -> Result<(), StoreError>;
        }
    }

    mock! {
        pub TestAppointmentQueries {}

        #[async_trait]
        impl AppointmentQueries for TestAppointmentQueries {
            async fn by_master(&self, master_id: i32) -> Result<Vec<Appointment>, StoreError>;
        }
    }

    fn appointment(id: i32, days_from_now: i64) -> Appointment {
        Appointment {
            id,
            title: "Haircut".to_string(),
            master_name: "Bob".to_string(),
            places: 1,
            client_name: Some("Alice".to_string()),
            description: None,
            duration_minutes: 45,
            booking_time: Utc::now() + Duration::days(days_from_now),
            master_id: 3,
        }
    }

    #[tokio::test]
    async fn test_by_master_week_filters_beyond_seven_days() {
        let repository = MockTestAppointmentRepository::new();
        let mut queries = MockTestAppointmentQueries::new();

        queries
            .expect_by_master()
            .with(eq(3))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    appointment(1, 2),
                    appointment(2, 10),
                    appointment(3, -1),
                ])
            });

        let service = AppointmentService::new(Arc::new(repository), Arc::new(queries));

        let week = service.by_master_week(3).await.expect("Query failed");
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].id, 1);
    }

    #[tokio::test]
    async fn test_get_missing_appointment_is_not_found() {
        let mut repository = MockTestAppointmentRepository::new();
        let queries = MockTestAppointmentQueries::new();

        repository
            .expect_get_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AppointmentService::new(Arc::new(repository), Arc::new(queries));

        let result = service.get(99).await;
        assert_eq!(result, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_create_forwards_to_repository() {
        let mut repository = MockTestAppointmentRepository::new();
        let queries = MockTestAppointmentQueries::new();

        repository
            .expect_add()
            .withf(|draft| draft.title == "Haircut")
            .times(1)
            .returning(|draft| {
                Ok(Appointment {
                    id: 1,
                    title: draft.title,
                    master_name: draft.master_name,
                    places: draft.places,
                    client_name: draft.client_name,
                    description: draft.description,
                    duration_minutes: draft.duration_minutes,
                    booking_time: draft.booking_time,
                    master_id: draft.master_id,
                })
            });

        let service = AppointmentService::new(Arc::new(repository), Arc::new(queries));

        let draft = AppointmentDraft {
            title: "Haircut".to_string(),
            master_name: "Bob".to_string(),
            places: 1,
            client_name: None,
            description: None,
            duration_minutes: 45,
            booking_time: Utc::now(),
            master_id: 3,
        };

        let created = service.create(draft).await.expect("Create failed");
        assert_eq!(created.id, 1);
    }
}
