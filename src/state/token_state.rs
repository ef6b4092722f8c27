use crate::config::database::Database;
use crate::error::token_error::TokenError;
use crate::repository::admin_repository::{AdminRepository, AdminRepositoryTrait};
use crate::repository::patient_repository::{PatientRepository, PatientRepositoryTrait};
use crate::service::token_service::{TokenService, TokenServiceTrait};
use std::sync::Arc;

/// State shared by the authentication middleware.
#[derive(Clone)]
pub struct TokenState {
    pub token_service: TokenService,
    pub patient_repo: PatientRepository,
    pub admin_repo: AdminRepository,
}

impl TokenState {
    pub fn new(db_conn: &Arc<Database>) -> Result<Self, TokenError> {
        Ok(Self {
            token_service: TokenService::new()?,
            patient_repo: PatientRepository::new(db_conn),
            admin_repo: AdminRepository::new(db_conn),
        })
    }
}
