use crate::config::database::Database;
use crate::error::token_error::TokenError;
use crate::repository::patient_repository::{PatientRepository, PatientRepositoryTrait};
use crate::service::patient_service::PatientService;
use crate::service::token_service::{TokenService, TokenServiceTrait};
use std::sync::Arc;

/// State for patient registration and login.
#[derive(Clone)]
pub struct AuthState {
    pub(crate) token_service: TokenService,
    pub(crate) patient_service: PatientService,
    pub(crate) patient_repo: PatientRepository,
}

impl AuthState {
    pub fn new(db_conn: &Arc<Database>) -> Result<Self, TokenError> {
        Ok(Self {
            token_service: TokenService::new()?,
            patient_service: PatientService::new(db_conn),
            patient_repo: PatientRepository::new(db_conn),
        })
    }
}
