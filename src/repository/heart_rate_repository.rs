use crate::config::database::{Database, DatabaseTrait};
use crate::entity::heart_rate::HeartRateRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct HeartRateRepository {
    pub(crate) db_conn: Arc<Database>,
}

#[async_trait]
pub trait HeartRateRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn insert(
        &self,
        patient_id: Uuid,
        value: i32,
        recorded_at: DateTime<Utc>,
    ) -> Result<HeartRateRecord, Error>;
    async fn find_by_patient(&self, patient_id: Uuid) -> Result<Vec<HeartRateRecord>, Error>;
}

#[async_trait]
impl HeartRateRepositoryTrait for HeartRateRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn insert(
        &self,
        patient_id: Uuid,
        value: i32,
        recorded_at: DateTime<Utc>,
    ) -> Result<HeartRateRecord, Error> {
        sqlx::query_as::<_, HeartRateRecord>(
            "INSERT INTO heart_rates (id, patient_id, value, recorded_at) \
             VALUES ($1, $2, $3, $4) RETURNING id, patient_id, value, recorded_at",
        )
        .bind(Uuid::now_v7())
        .bind(patient_id)
        .bind(value)
        .bind(recorded_at)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn find_by_patient(&self, patient_id: Uuid) -> Result<Vec<HeartRateRecord>, Error> {
        sqlx::query_as::<_, HeartRateRecord>(
            "SELECT id, patient_id, value, recorded_at FROM heart_rates \
             WHERE patient_id = $1 ORDER BY recorded_at ASC",
        )
        .bind(patient_id)
        .fetch_all(self.db_conn.get_pool())
        .await
    }
}
