use crate::config::database::{Database, DatabaseTrait};
use crate::dto::feedback_dto::FeedbackWithPatientDto;
use crate::entity::feedback::Feedback;
use async_trait::async_trait;
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct FeedbackRepository {
    pub(crate) db_conn: Arc<Database>,
}

#[async_trait]
pub trait FeedbackRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn insert(&self, patient_id: Uuid, message: &str) -> Result<Feedback, Error>;
    async fn find_all_with_patient(&self) -> Result<Vec<FeedbackWithPatientDto>, Error>;
}

#[async_trait]
impl FeedbackRepositoryTrait for FeedbackRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn insert(&self, patient_id: Uuid, message: &str) -> Result<Feedback, Error> {
        sqlx::query_as::<_, Feedback>(
            "INSERT INTO feedback (id, patient_id, message) \
             VALUES ($1, $2, $3) RETURNING id, patient_id, message, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(patient_id)
        .bind(message)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn find_all_with_patient(&self) -> Result<Vec<FeedbackWithPatientDto>, Error> {
        sqlx::query_as::<_, FeedbackWithPatientDto>(
            "SELECT f.id, f.message, f.created_at, p.id AS patient_id, \
                    p.first_name, p.last_name, p.email \
             FROM feedback f JOIN patients p ON p.id = f.patient_id \
             ORDER BY f.created_at DESC",
        )
        .fetch_all(self.db_conn.get_pool())
        .await
    }
}
