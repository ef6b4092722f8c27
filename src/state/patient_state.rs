use crate::config::database::Database;
use crate::config::parameter;
use crate::repository::patient_repository::{PatientRepository, PatientRepositoryTrait};
use crate::service::mailer_service::Mailer;
use std::path::PathBuf;
use std::sync::Arc;

/// State for the authenticated patient profile surface.
#[derive(Clone)]
pub struct PatientState {
    pub(crate) patient_repo: PatientRepository,
    pub(crate) mailer: Arc<dyn Mailer>,
    pub(crate) profile_pictures_dir: PathBuf,
}

impl PatientState {
    pub fn new(db_conn: &Arc<Database>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            patient_repo: PatientRepository::new(db_conn),
            mailer,
            profile_pictures_dir: PathBuf::from(parameter::get("PROFILE_PICTURES_DIR")),
        }
    }
}
