use crate::config::database::Database;
use crate::repository::feedback_repository::{FeedbackRepository, FeedbackRepositoryTrait};
use std::sync::Arc;

#[derive(Clone)]
pub struct FeedbackState {
    pub(crate) feedback_repo: FeedbackRepository,
}

impl FeedbackState {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            feedback_repo: FeedbackRepository::new(db_conn),
        }
    }
}
