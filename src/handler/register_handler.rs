use crate::config::logging::secure_log;
use crate::dto::patient_dto::PatientRegisterDto;
use crate::dto::token_dto::{TokenReadDto, ROLE_PATIENT};
use crate::error::{api_error::ApiError, request_error::ValidatedRequest};
use crate::response::app_response::SuccessResponse;
use crate::service::token_service::TokenServiceTrait;
use crate::state::auth_state::AuthState;
use axum::extract::State;
use axum::http::StatusCode;

/// Registration logs the new patient straight in by returning a token.
pub async fn register(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<PatientRegisterDto>,
) -> Result<SuccessResponse<TokenReadDto>, ApiError> {
    secure_log::sensitive_debug!("Patient registration attempt for email: {}", payload.email);

    let patient = state.patient_service.create_patient(payload).await?;
    let token = state.token_service.generate_token(patient.id, ROLE_PATIENT)?;

    Ok(SuccessResponse::send(token).with_status(StatusCode::CREATED))
}
