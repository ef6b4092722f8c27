use crate::config::parameter;
use async_trait::async_trait;
use sqlx::{pool::PoolOptions, Error, Pool, Postgres};
use std::time::Duration;
use tracing::info;

pub struct Database {
    pool: Pool<Postgres>,
}

#[async_trait]
pub trait DatabaseTrait {
    async fn init() -> Result<Self, Error>
    where
        Self: Sized;
    fn get_pool(&self) -> &Pool<Postgres>;
}

fn pool_setting(name: &str, default: u64) -> u64 {
    parameter::get_optional(name)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

#[async_trait]
impl DatabaseTrait for Database {
    async fn init() -> Result<Self, Error> {
        let database_url = parameter::get("DATABASE_URL");

        let max_connections = pool_setting("DB_MAX_CONNECTIONS", 20) as u32;
        let min_connections = pool_setting("DB_MIN_CONNECTIONS", 5) as u32;
        let acquire_timeout = Duration::from_secs(pool_setting("DB_ACQUIRE_TIMEOUT_SECONDS", 30));
        let idle_timeout = Duration::from_secs(pool_setting("DB_IDLE_TIMEOUT_SECONDS", 600));
        let max_lifetime = Duration::from_secs(pool_setting("DB_MAX_LIFETIME_SECONDS", 1800));

        let pool = PoolOptions::<Postgres>::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .max_lifetime(max_lifetime)
            .connect(&database_url)
            .await?;

        // Pool capacity details stay out of production logs
        let is_development = cfg!(debug_assertions)
            || parameter::get_optional("ENV")
                .map(|env| env == "development")
                .unwrap_or(false);
        if is_development {
            info!(
                "Database pool configured: max={}, min={}, acquire_timeout={:?}, idle_timeout={:?}, max_lifetime={:?}",
                max_connections, min_connections, acquire_timeout, idle_timeout, max_lifetime
            );
        } else {
            info!("Database pool configured successfully");
        }

        Ok(Self { pool })
    }

    fn get_pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}
