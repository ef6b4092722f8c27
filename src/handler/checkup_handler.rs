use crate::config::logging::secure_log;
use crate::dto::patient_dto::{CheckupDateReadDto, SetCheckupDateDto};
use crate::entity::patient::Patient;
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::error::patient_error::PatientError;
use crate::error::request_error::ValidatedRequest;
use crate::repository::patient_repository::PatientRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::service::mailer_service::checkup_confirmation_body;
use crate::state::patient_state::PatientState;
use axum::extract::State;
use axum::Extension;
use tracing::info;

/// Record the patient's last checkup date and send a confirmation email.
///
/// The update also clears the reminder flag, so a previously-notified
/// patient re-enters the pending reminder cycle for the new date.
pub async fn set_checkup_date(
    State(state): State<PatientState>,
    Extension(current_patient): Extension<Patient>,
    ValidatedRequest(payload): ValidatedRequest<SetCheckupDateDto>,
) -> Result<SuccessResponse<CheckupDateReadDto>, ApiError> {
    let updated = state
        .patient_repo
        .set_checkup_date(current_patient.id, payload.checkup_date)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::Patient(PatientError::PatientNotFound),
            e => {
                secure_log::secure_error!("Failed to save checkup date", e);
                ApiError::Db(DbError::SomethingWentWrong(
                    "Failed to save checkup date".to_string(),
                ))
            }
        })?;

    state
        .mailer
        .send(
            &payload.checkup_email,
            "Medical Checkup Reminder",
            &checkup_confirmation_body(&updated.first_name, payload.checkup_date),
        )
        .await?;

    info!("Checkup date saved for patient ID: {}", updated.id);

    Ok(SuccessResponse::send(CheckupDateReadDto {
        last_checkup_date: payload.checkup_date,
    }))
}
