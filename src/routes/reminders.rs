use crate::handler::reminder_handler;
use crate::state::reminder_state::ReminderState;
use axum::routing::post;
use axum::Router;

pub fn routes(reminder_state: ReminderState) -> Router {
    Router::new()
        .route("/run", post(reminder_handler::run_reminders))
        .with_state(reminder_state)
}
