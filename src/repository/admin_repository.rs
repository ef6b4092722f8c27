use crate::config::database::{Database, DatabaseTrait};
use crate::config::logging::secure_log;
use crate::entity::admin::Admin;
use async_trait::async_trait;
use sqlx::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct AdminRepository {
    pub(crate) db_conn: Arc<Database>,
}

#[async_trait]
pub trait AdminRepositoryTrait {
    fn new(db_conn: &Arc<Database>) -> Self;
    async fn find_by_email(&self, email: String) -> Option<Admin>;
    async fn email_exists(&self, email: String) -> Result<bool, Error>;
    async fn find(&self, id: Uuid) -> Result<Admin, Error>;
}

#[async_trait]
impl AdminRepositoryTrait for AdminRepository {
    fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }

    async fn find_by_email(&self, email: String) -> Option<Admin> {
        match sqlx::query_as::<_, Admin>(
            "SELECT id, name, email, password, created_at, updated_at FROM admins WHERE email = $1",
        )
        .bind(&email)
        .fetch_optional(self.db_conn.get_pool())
        .await
        {
            Ok(admin) => admin,
            Err(e) => {
                secure_log::secure_error!("Admin lookup by email failed", e);
                None
            }
        }
    }

    async fn email_exists(&self, email: String) -> Result<bool, Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM admins WHERE email = $1)")
            .bind(&email)
            .fetch_one(self.db_conn.get_pool())
            .await
    }

    async fn find(&self, id: Uuid) -> Result<Admin, Error> {
        sqlx::query_as::<_, Admin>(
            "SELECT id, name, email, password, created_at, updated_at FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_one(self.db_conn.get_pool())
        .await
    }
}
