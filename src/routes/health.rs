use crate::config::database::Database;
use crate::handler::health_handler;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

pub fn routes(db_conn: Arc<Database>) -> Router {
    Router::new()
        .route("/health", get(health_handler::health_check))
        .route("/health/detailed", get(health_handler::detailed_health_check))
        .with_state(db_conn)
}
