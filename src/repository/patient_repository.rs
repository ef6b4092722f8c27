use crate::config::database::{Database, DatabaseTrait};
use crate::config::logging::secure_log;
use crate::dto::patient_dto::ProfileUpdateDto;
use crate::entity::patient::Patient;
use crate::service::reminder_service::{DuePatient, ReminderStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct PatientRepository {
    pub(crate) db_conn: Arc<Database>,
}

#[async_trait]
pub trait PatientRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn find_by_email(&self, email: String) -> Option<Patient>;
    async fn email_exists(&self, email: String) -> Result<bool, Error>;
    async fn find(&self, id: Uuid) -> Result<Patient, Error>;
    async fn find_all(&self) -> Result<Vec<Patient>, Error>;
    async fn count(&self) -> Result<i64, Error>;
    async fn update_profile(&self, id: Uuid, update: ProfileUpdateDto) -> Result<Patient, Error>;
    async fn set_checkup_date(&self, id: Uuid, date: DateTime<Utc>) -> Result<Patient, Error>;
    async fn update_status(&self, id: Uuid, status: &str) -> Result<bool, Error>;
    async fn delete(&self, id: Uuid) -> Result<bool, Error>;
}

const PATIENT_COLUMNS: &str = "id, first_name, last_name, email, password, allergies, \
     chronic_conditions, profile_picture, status, last_checkup_date, reminder_sent, \
     created_at, updated_at";

#[async_trait]
impl PatientRepositoryTrait for PatientRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn find_by_email(&self, email: String) -> Option<Patient> {
        let query = format!("SELECT {} FROM patients WHERE email = $1", PATIENT_COLUMNS);
        match sqlx::query_as::<_, Patient>(&query)
            .bind(&email)
            .fetch_optional(self.db_conn.get_pool())
            .await
        {
            Ok(patient) => patient,
            Err(e) => {
                secure_log::secure_error!("Patient lookup by email failed", e);
                None
            }
        }
    }

    async fn email_exists(&self, email: String) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM patients WHERE email = $1)")
            .bind(&email)
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn find(&self, id: Uuid) -> Result<Patient, Error> {
        let query = format!("SELECT {} FROM patients WHERE id = $1", PATIENT_COLUMNS);
        sqlx::query_as::<_, Patient>(&query)
            .bind(id)
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn find_all(&self) -> Result<Vec<Patient>, Error> {
        let query = format!("SELECT {} FROM patients ORDER BY created_at DESC", PATIENT_COLUMNS);
        sqlx::query_as::<_, Patient>(&query)
            .fetch_all(self.db_conn.get_pool())
            .await
    }

    async fn count(&self) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM patients")
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdateDto) -> Result<Patient, Error> {
        let query = format!(
            "UPDATE patients SET \
                first_name = COALESCE($1, first_name), \
                last_name = COALESCE($2, last_name), \
                allergies = COALESCE($3, allergies), \
                chronic_conditions = COALESCE($4, chronic_conditions), \
                profile_picture = COALESCE($5, profile_picture), \
                updated_at = NOW() \
             WHERE id = $6 RETURNING {}",
            PATIENT_COLUMNS
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(update.first_name)
            .bind(update.last_name)
            .bind(update.allergies)
            .bind(update.chronic_conditions)
            .bind(update.profile_picture)
            .bind(id)
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    // Recording a new checkup date clears reminder_sent in the same
    // statement, returning the record to the pending reminder state.
    async fn set_checkup_date(&self, id: Uuid, date: DateTime<Utc>) -> Result<Patient, Error> {
        let query = format!(
            "UPDATE patients SET last_checkup_date = $1, reminder_sent = FALSE, updated_at = NOW() \
             WHERE id = $2 RETURNING {}",
            PATIENT_COLUMNS
        );
        sqlx::query_as::<_, Patient>(&query)
            .bind(date)
            .bind(id)
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn update_status(&self, id: Uuid, status: &str) -> Result<bool, Error> {
        let result = sqlx::query("UPDATE patients SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(self.db_conn.get_pool())
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(self.db_conn.get_pool())
            .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl ReminderStore for PatientRepository {
    async fn find_due(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<DuePatient>, Box<dyn std::error::Error + Send + Sync>> {
        let due = sqlx::query_as::<_, DuePatient>(
            "SELECT id, first_name, email, last_checkup_date FROM patients \
             WHERE last_checkup_date IS NOT NULL \
               AND last_checkup_date <= $1 \
               AND reminder_sent = FALSE \
               AND status = 'active' \
             ORDER BY last_checkup_date",
        )
        .bind(cutoff)
        .fetch_all(self.db_conn.get_pool())
        .await?;
        Ok(due)
    }

    // Compare-and-set on the checkup date: if the patient recorded a new
    // date while the reminder was in flight, the update matches zero rows
    // and the new cycle stays pending.
    async fn mark_notified(
        &self,
        id: Uuid,
        last_checkup_date: DateTime<Utc>,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(
            "UPDATE patients SET reminder_sent = TRUE, updated_at = NOW() \
             WHERE id = $1 AND last_checkup_date = $2 AND reminder_sent = FALSE",
        )
        .bind(id)
        .bind(last_checkup_date)
        .execute(self.db_conn.get_pool())
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
