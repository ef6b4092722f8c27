use crate::config::logging::secure_log;
use crate::dto::heart_rate_dto::{HeartRateCreateDto, HeartRateReadDto};
use crate::entity::patient::Patient;
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::error::request_error::ValidatedRequest;
use crate::repository::heart_rate_repository::HeartRateRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::state::heart_rate_state::HeartRateState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::Utc;

pub async fn add_heart_rate(
    State(state): State<HeartRateState>,
    Extension(current_patient): Extension<Patient>,
    ValidatedRequest(payload): ValidatedRequest<HeartRateCreateDto>,
) -> Result<SuccessResponse<HeartRateReadDto>, ApiError> {
    let recorded_at = payload.recorded_at.unwrap_or_else(Utc::now);

    let record = state
        .heart_rate_repo
        .insert(current_patient.id, payload.value, recorded_at)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Failed to insert heart rate entry", e);
            ApiError::Db(DbError::SomethingWentWrong(
                "Failed to save heart rate entry".to_string(),
            ))
        })?;

    Ok(SuccessResponse::send(HeartRateReadDto::from(record)).with_status(StatusCode::CREATED))
}

pub async fn heart_rate_history(
    State(state): State<HeartRateState>,
    Extension(current_patient): Extension<Patient>,
) -> Result<SuccessResponse<Vec<HeartRateReadDto>>, ApiError> {
    let records = state
        .heart_rate_repo
        .find_by_patient(current_patient.id)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Failed to fetch heart rate history", e);
            ApiError::Db(DbError::SomethingWentWrong(
                "Failed to fetch heart rate history".to_string(),
            ))
        })?;

    Ok(SuccessResponse::send(
        records.into_iter().map(HeartRateReadDto::from).collect(),
    ))
}
