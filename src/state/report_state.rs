use crate::config::database::Database;
use crate::config::parameter;
use crate::repository::report_repository::{ReportRepository, ReportRepositoryTrait};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReportState {
    pub(crate) report_repo: ReportRepository,
    pub(crate) reports_dir: PathBuf,
}

impl ReportState {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            report_repo: ReportRepository::new(db_conn),
            reports_dir: PathBuf::from(parameter::get("REPORTS_DIR")),
        }
    }
}
