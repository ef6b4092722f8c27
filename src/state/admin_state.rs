use crate::config::database::Database;
use crate::error::token_error::TokenError;
use crate::repository::admin_repository::{AdminRepository, AdminRepositoryTrait};
use crate::repository::feedback_repository::{FeedbackRepository, FeedbackRepositoryTrait};
use crate::repository::patient_repository::{PatientRepository, PatientRepositoryTrait};
use crate::repository::report_repository::{ReportRepository, ReportRepositoryTrait};
use crate::service::admin_service::AdminService;
use crate::service::token_service::{TokenService, TokenServiceTrait};
use std::sync::Arc;

/// State for the admin surface: account management, dashboard and feedback.
#[derive(Clone)]
pub struct AdminState {
    pub(crate) token_service: TokenService,
    pub(crate) admin_service: AdminService,
    pub(crate) admin_repo: AdminRepository,
    pub(crate) patient_repo: PatientRepository,
    pub(crate) report_repo: ReportRepository,
    pub(crate) feedback_repo: FeedbackRepository,
}

impl AdminState {
    pub fn new(db_conn: &Arc<Database>) -> Result<Self, TokenError> {
        Ok(Self {
            token_service: TokenService::new()?,
            admin_service: AdminService::new(db_conn),
            admin_repo: AdminRepository::new(db_conn),
            patient_repo: PatientRepository::new(db_conn),
            report_repo: ReportRepository::new(db_conn),
            feedback_repo: FeedbackRepository::new(db_conn),
        })
    }
}
