use crate::config::database::{Database, DatabaseTrait};
use crate::config::logging::secure_log;
use crate::config::parameter;
use crate::dto::admin_dto::AdminRegisterDto;
use crate::entity::admin::Admin;
use crate::error::admin_error::AdminError;
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::repository::admin_repository::{AdminRepository, AdminRepositoryTrait};
use std::sync::Arc;

#[derive(Clone)]
pub struct AdminService {
    admin_repo: AdminRepository,
    db_conn: Arc<Database>,
}

impl AdminService {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            admin_repo: AdminRepository::new(db_conn),
            db_conn: Arc::clone(db_conn),
        }
    }

    pub async fn create_admin(&self, payload: AdminRegisterDto) -> Result<Admin, ApiError> {
        match self.admin_repo.email_exists(payload.email.to_owned()).await {
            Ok(exists) => {
                if exists {
                    return Err(AdminError::AdminAlreadyExists)?;
                }
            }
            Err(e) => {
                secure_log::secure_error!("Failed to check admin email existence", e);
                return Err(ApiError::Db(DbError::SomethingWentWrong(
                    "Failed to validate email".to_string(),
                )));
            }
        }

        let admin_id = uuid::Uuid::now_v7();

        let bcrypt_cost = parameter::get_u64("BCRYPT_COST") as u32;
        let hashed_password = bcrypt::hash(payload.password, bcrypt_cost).map_err(|e| {
            secure_log::secure_error!("Failed to hash password", e);
            ApiError::Db(DbError::SomethingWentWrong("Password hashing failed".to_string()))
        })?;

        let insert_result = sqlx::query(
            "INSERT INTO admins (id, name, email, password) VALUES ($1, $2, $3, $4)",
        )
        .bind(admin_id)
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&hashed_password)
        .execute(self.db_conn.get_pool())
        .await;

        match insert_result {
            Ok(_) => self.admin_repo.find(admin_id).await.map_err(|e| {
                secure_log::secure_error!("Failed to find admin after insertion", e);
                ApiError::Db(DbError::SomethingWentWrong("Admin creation failed".to_string()))
            }),
            Err(e) => {
                secure_log::secure_error!("Failed to insert admin", e);
                Err(ApiError::Db(DbError::SomethingWentWrong(
                    "Admin creation failed".to_string(),
                )))
            }
        }
    }

    pub fn verify_password(&self, admin: &Admin, password: &str) -> Result<bool, ApiError> {
        match bcrypt::verify(password, &admin.password) {
            Ok(is_valid) => Ok(is_valid),
            Err(e) => {
                secure_log::secure_error!("SECURITY: Password verification system error", e);
                Ok(false)
            }
        }
    }
}
