use crate::config::database::{Database, DatabaseTrait};
use crate::config::logging::secure_log;
use crate::config::parameter;
use crate::dto::patient_dto::PatientRegisterDto;
use crate::entity::patient::Patient;
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::error::patient_error::PatientError;
use crate::repository::patient_repository::{PatientRepository, PatientRepositoryTrait};
use std::sync::Arc;

#[derive(Clone)]
pub struct PatientService {
    patient_repo: PatientRepository,
    db_conn: Arc<Database>,
}

impl PatientService {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            patient_repo: PatientRepository::new(db_conn),
            db_conn: Arc::clone(db_conn),
        }
    }

    pub async fn create_patient(&self, payload: PatientRegisterDto) -> Result<Patient, ApiError> {
        match self.patient_repo.email_exists(payload.email.to_owned()).await {
            Ok(exists) => {
                if exists {
                    return Err(PatientError::PatientAlreadyExists)?;
                }
            }
            Err(e) => {
                secure_log::secure_error!("Failed to check email existence", e);
                return Err(ApiError::Db(DbError::SomethingWentWrong(
                    "Failed to validate email".to_string(),
                )));
            }
        }

        self.add_patient(payload).await
    }

    async fn add_patient(&self, payload: PatientRegisterDto) -> Result<Patient, ApiError> {
        let patient_id = uuid::Uuid::now_v7();

        let bcrypt_cost = parameter::get_u64("BCRYPT_COST") as u32;
        let hashed_password = bcrypt::hash(payload.password, bcrypt_cost).map_err(|e| {
            secure_log::secure_error!("Failed to hash password", e);
            ApiError::Db(DbError::SomethingWentWrong("Password hashing failed".to_string()))
        })?;

        let insert_result = sqlx::query(
            "INSERT INTO patients (id, first_name, last_name, email, password) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(patient_id)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&hashed_password)
        .execute(self.db_conn.get_pool())
        .await;

        match insert_result {
            Ok(_) => self.patient_repo.find(patient_id).await.map_err(|e| {
                secure_log::secure_error!("Failed to find patient after insertion", e);
                ApiError::Db(DbError::SomethingWentWrong("Patient creation failed".to_string()))
            }),
            Err(e) => {
                secure_log::secure_error!("Failed to insert patient", e);
                Err(ApiError::Db(DbError::SomethingWentWrong(
                    "Patient creation failed".to_string(),
                )))
            }
        }
    }

    pub fn verify_password(&self, patient: &Patient, password: &str) -> Result<bool, ApiError> {
        match bcrypt::verify(password, &patient.password) {
            Ok(is_valid) => {
                if !is_valid {
                    secure_log::secure_error!(
                        "SECURITY: Invalid password attempt for patient ID",
                        patient.id
                    );
                }
                Ok(is_valid)
            }
            Err(e) => {
                secure_log::secure_error!("SECURITY: Password verification system error", e);
                // Report a mismatch rather than an error to prevent enumeration
                Ok(false)
            }
        }
    }

}
