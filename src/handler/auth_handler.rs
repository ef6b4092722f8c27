use crate::dto::patient_dto::PatientLoginDto;
use crate::dto::token_dto::{TokenReadDto, ROLE_PATIENT};
use crate::error::{api_error::ApiError, patient_error::PatientError, request_error::ValidatedRequest};
use crate::repository::patient_repository::PatientRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::service::token_service::TokenServiceTrait;
use crate::state::auth_state::AuthState;
use axum::extract::State;
use tracing::{info, warn};

pub async fn login(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<PatientLoginDto>,
) -> Result<SuccessResponse<TokenReadDto>, ApiError> {
    info!("Login attempt for email: {}", payload.email);

    let patient = state
        .patient_repo
        .find_by_email(payload.email.clone())
        .await
        .ok_or_else(|| {
            warn!("Login failed - patient not found: {}", payload.email);
            PatientError::InvalidCredentials
        })?;

    match state.patient_service.verify_password(&patient, &payload.password)? {
        true => {
            let token = state.token_service.generate_token(patient.id, ROLE_PATIENT)?;
            info!("Login successful for patient ID: {}", patient.id);
            Ok(SuccessResponse::send(token))
        }
        false => {
            warn!("Invalid password for email: {}", payload.email);
            Err(PatientError::InvalidCredentials)?
        }
    }
}
