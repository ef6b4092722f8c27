use crate::config::database::{Database, DatabaseTrait};
use crate::entity::report::{Report, ReportComment};
use async_trait::async_trait;
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct ReportRepository {
    pub(crate) db_conn: Arc<Database>,
}

#[async_trait]
pub trait ReportRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn insert(
        &self,
        patient_id: Uuid,
        file_name: &str,
        stored_file_name: &str,
        report_type: &str,
    ) -> Result<Report, Error>;
    async fn find(&self, id: Uuid) -> Result<Report, Error>;
    async fn find_by_patient(&self, patient_id: Uuid) -> Result<Vec<Report>, Error>;
    async fn count(&self) -> Result<i64, Error>;
    async fn add_comment(
        &self,
        report_id: Uuid,
        author: &str,
        text: &str,
    ) -> Result<ReportComment, Error>;
    async fn comments_for(&self, report_id: Uuid) -> Result<Vec<ReportComment>, Error>;
}

#[async_trait]
impl ReportRepositoryTrait for ReportRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn insert(
        &self,
        patient_id: Uuid,
        file_name: &str,
        stored_file_name: &str,
        report_type: &str,
    ) -> Result<Report, Error> {
        sqlx::query_as::<_, Report>(
            "INSERT INTO reports (id, patient_id, file_name, stored_file_name, report_type) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, patient_id, file_name, stored_file_name, report_type, uploaded_at",
        )
        .bind(Uuid::now_v7())
        .bind(patient_id)
        .bind(file_name)
        .bind(stored_file_name)
        .bind(report_type)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn find(&self, id: Uuid) -> Result<Report, Error> {
        sqlx::query_as::<_, Report>(
            "SELECT id, patient_id, file_name, stored_file_name, report_type, uploaded_at \
             FROM reports WHERE id = $1",
        )
        .bind(id)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn find_by_patient(&self, patient_id: Uuid) -> Result<Vec<Report>, Error> {
        sqlx::query_as::<_, Report>(
            "SELECT id, patient_id, file_name, stored_file_name, report_type, uploaded_at \
             FROM reports WHERE patient_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(patient_id)
        .fetch_all(self.db_conn.get_pool())
        .await
    }

    async fn count(&self) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reports")
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn add_comment(
        &self,
        report_id: Uuid,
        author: &str,
        text: &str,
    ) -> Result<ReportComment, Error> {
        sqlx::query_as::<_, ReportComment>(
            "INSERT INTO report_comments (id, report_id, author, text) \
             VALUES ($1, $2, $3, $4) RETURNING id, report_id, author, text, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(report_id)
        .bind(author)
        .bind(text)
        .fetch_one(self.db_conn.get_pool())
        .await
    }

    async fn comments_for(&self, report_id: Uuid) -> Result<Vec<ReportComment>, Error> {
        sqlx::query_as::<_, ReportComment>(
            "SELECT id, report_id, author, text, created_at FROM report_comments \
             WHERE report_id = $1 ORDER BY created_at ASC",
        )
        .bind(report_id)
        .fetch_all(self.db_conn.get_pool())
        .await
    }
}
