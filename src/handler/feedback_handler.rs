use crate::config::logging::secure_log;
use crate::dto::feedback_dto::{FeedbackCreateDto, FeedbackWithPatientDto};
use crate::entity::patient::Patient;
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::error::request_error::ValidatedRequest;
use crate::repository::feedback_repository::FeedbackRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::state::feedback_state::FeedbackState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use tracing::info;

pub async fn submit_feedback(
    State(state): State<FeedbackState>,
    Extension(current_patient): Extension<Patient>,
    ValidatedRequest(payload): ValidatedRequest<FeedbackCreateDto>,
) -> Result<SuccessResponse<String>, ApiError> {
    state
        .feedback_repo
        .insert(current_patient.id, &payload.message)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Failed to insert feedback", e);
            ApiError::Db(DbError::SomethingWentWrong("Failed to submit feedback".to_string()))
        })?;

    info!("Feedback submitted by patient ID: {}", current_patient.id);

    Ok(SuccessResponse::send("Feedback submitted successfully".to_string())
        .with_status(StatusCode::CREATED))
}

pub async fn all_feedback(
    State(state): State<FeedbackState>,
) -> Result<SuccessResponse<Vec<FeedbackWithPatientDto>>, ApiError> {
    let feedback = state.feedback_repo.find_all_with_patient().await.map_err(|e| {
        secure_log::secure_error!("Failed to fetch feedback", e);
        ApiError::Db(DbError::SomethingWentWrong("Failed to fetch feedback".to_string()))
    })?;

    Ok(SuccessResponse::send(feedback))
}
