use crate::config::logging::secure_log;
use crate::error::api_error::ApiError;
use crate::error::token_error::TokenError;
use crate::middleware::auth::extract_bearer;
use crate::response::app_response::SuccessResponse;
use crate::service::reminder_service::BatchResult;
use crate::state::reminder_state::ReminderState;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use chrono::Utc;
use tracing::info;

/// External trigger surface for the reminder scheduler. Requires the shared
/// trigger secret as a bearer credential; an unauthorized call performs no
/// work. Returns the batch summary of one cycle.
pub async fn run_reminders(
    State(state): State<ReminderState>,
    headers: HeaderMap,
) -> Result<SuccessResponse<BatchResult>, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let token = extract_bearer(auth_header)?;
    if token != state.trigger_secret {
        secure_log::secure_error!("SECURITY: Invalid reminder trigger credential");
        return Err(TokenError::InvalidToken)?;
    }

    info!("Reminder run triggered externally");
    let result = state.scheduler.run_cycle(Utc::now()).await?;

    Ok(SuccessResponse::send(result))
}
