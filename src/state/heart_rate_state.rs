use crate::config::database::Database;
use crate::repository::heart_rate_repository::{HeartRateRepository, HeartRateRepositoryTrait};
use std::sync::Arc;

#[derive(Clone)]
pub struct HeartRateState {
    pub(crate) heart_rate_repo: HeartRateRepository,
}

impl HeartRateState {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            heart_rate_repo: HeartRateRepository::new(db_conn),
        }
    }
}
