use crate::config::logging::secure_log;
use crate::dto::patient_dto::{PatientReadDto, ProfileUpdateDto};
use crate::entity::patient::Patient;
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::error::patient_error::PatientError;
use crate::error::request_error::RequestError;
use crate::repository::patient_repository::PatientRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::state::patient_state::PatientState;
use axum::extract::{Multipart, State};
use axum::Extension;
use std::path::Path;

pub async fn profile(
    Extension(current_patient): Extension<Patient>,
) -> SuccessResponse<PatientReadDto> {
    secure_log::sensitive_debug!("Profile accessed for patient ID: {}", current_patient.id);

    SuccessResponse::send(PatientReadDto::from(current_patient))
}

/// Multipart profile update: text fields plus an optional profile picture.
pub async fn edit_profile(
    State(state): State<PatientState>,
    Extension(current_patient): Extension<Patient>,
    mut multipart: Multipart,
) -> Result<SuccessResponse<PatientReadDto>, ApiError> {
    let mut update = ProfileUpdateDto::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RequestError::Multipart(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("first_name") => {
                update.first_name = Some(read_text(field).await?);
            }
            Some("last_name") => {
                update.last_name = Some(read_text(field).await?);
            }
            Some("allergies") => {
                update.allergies = Some(read_text(field).await?);
            }
            Some("chronic_conditions") => {
                update.chronic_conditions = Some(read_text(field).await?);
            }
            Some("profile_picture") => {
                let extension = field
                    .file_name()
                    .and_then(|name| Path::new(name).extension().and_then(|e| e.to_str()))
                    .map(|e| format!(".{}", e))
                    .unwrap_or_default();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| RequestError::Multipart(e.to_string()))?;

                let stored_name =
                    format!("{}-{}{}", current_patient.id, uuid::Uuid::now_v7(), extension);

                let store_result = async {
                    tokio::fs::create_dir_all(&state.profile_pictures_dir).await?;
                    tokio::fs::write(state.profile_pictures_dir.join(&stored_name), &bytes).await
                }
                .await;
                store_result.map_err(|e| {
                    secure_log::secure_error!("Failed to store profile picture", e);
                    ApiError::Db(DbError::SomethingWentWrong(
                        "Failed to store profile picture".to_string(),
                    ))
                })?;

                update.profile_picture = Some(format!("/uploads/profile_pictures/{}", stored_name));
            }
            _ => {}
        }
    }

    let updated = state
        .patient_repo
        .update_profile(current_patient.id, update)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => ApiError::Patient(PatientError::PatientNotFound),
            e => {
                secure_log::secure_error!("Failed to update profile", e);
                ApiError::Db(DbError::SomethingWentWrong("Profile update failed".to_string()))
            }
        })?;

    Ok(SuccessResponse::send(PatientReadDto::from(updated)))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::Request(RequestError::Multipart(e.to_string())))
}
