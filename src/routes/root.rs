use crate::config::database::Database;
use crate::config::parameter;
use crate::error::AppError;
use crate::routes::{admin, feedback, health, heart_rate, patients, reminders, reports};
use crate::service::mailer_service::Mailer;
use crate::state::admin_state::AdminState;
use crate::state::auth_state::AuthState;
use crate::state::feedback_state::FeedbackState;
use crate::state::heart_rate_state::HeartRateState;
use crate::state::patient_state::PatientState;
use crate::state::reminder_state::ReminderState;
use crate::state::report_state::ReportState;
use crate::state::token_state::TokenState;
use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn routes(
    db_conn: Arc<Database>,
    mailer: Arc<dyn Mailer>,
    reminder_state: ReminderState,
) -> Result<Router, AppError> {
    let auth_state = AuthState::new(&db_conn)?;
    let token_state = TokenState::new(&db_conn)?;
    let admin_state = AdminState::new(&db_conn)?;
    let patient_state = PatientState::new(&db_conn, mailer);
    let heart_rate_state = HeartRateState::new(&db_conn);
    let report_state = ReportState::new(&db_conn);
    let feedback_state = FeedbackState::new(&db_conn);

    let uploads_dir = parameter::get("UPLOADS_DIR");

    let app_router = Router::new()
        .nest(
            "/api/patients",
            patients::routes(auth_state, patient_state, token_state.clone()),
        )
        .nest(
            "/api/heartrate",
            heart_rate::routes(heart_rate_state, token_state.clone()),
        )
        .nest(
            "/api/reports",
            reports::routes(report_state, token_state.clone()),
        )
        .nest(
            "/api/feedback",
            feedback::routes(feedback_state, token_state.clone()),
        )
        .nest("/api/admin", admin::routes(admin_state, token_state))
        .nest("/api/reminders", reminders::routes(reminder_state))
        .nest("/api", health::routes(db_conn))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(TraceLayer::new_for_http());

    Ok(app_router)
}
