use crate::handler::report_handler;
use crate::middleware::auth as auth_middleware;
use crate::state::report_state::ReportState;
use crate::state::token_state::TokenState;
use axum::routing::{get, post};
use axum::{middleware, Router};

pub fn routes(report_state: ReportState, token_state: TokenState) -> Router {
    Router::new()
        .route("/upload", post(report_handler::upload_report))
        .route("/", get(report_handler::get_reports))
        .route("/comment/{report_id}", post(report_handler::add_comment))
        .route("/download/{report_id}", get(report_handler::download_report))
        .with_state(report_state)
        .layer(middleware::from_fn_with_state(
            token_state,
            auth_middleware::auth,
        ))
}
