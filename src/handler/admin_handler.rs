use crate::config::logging::secure_log;
use crate::dto::admin_dto::{
    AdminLoginDto, AdminReadDto, AdminRegisterDto, AdminTokenReadDto, DashboardReadDto,
};
use crate::dto::feedback_dto::FeedbackWithPatientDto;
use crate::dto::patient_dto::{PatientReadDto, PatientStatusUpdateDto};
use crate::dto::token_dto::ROLE_ADMIN;
use crate::entity::admin::Admin;
use crate::entity::patient::{STATUS_ACTIVE, STATUS_DEACTIVATED};
use crate::error::admin_error::AdminError;
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::error::patient_error::PatientError;
use crate::error::request_error::ValidatedRequest;
use crate::repository::admin_repository::AdminRepositoryTrait;
use crate::repository::feedback_repository::FeedbackRepositoryTrait;
use crate::repository::patient_repository::PatientRepositoryTrait;
use crate::repository::report_repository::ReportRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::service::token_service::TokenServiceTrait;
use crate::state::admin_state::AdminState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Extension;
use tracing::{info, warn};
use uuid::Uuid;

pub async fn register_admin(
    State(state): State<AdminState>,
    ValidatedRequest(payload): ValidatedRequest<AdminRegisterDto>,
) -> Result<SuccessResponse<AdminReadDto>, ApiError> {
    let admin = state.admin_service.create_admin(payload).await?;
    info!("Admin account created: {}", admin.id);

    Ok(SuccessResponse::send(AdminReadDto::from(admin)).with_status(StatusCode::CREATED))
}

pub async fn login_admin(
    State(state): State<AdminState>,
    ValidatedRequest(payload): ValidatedRequest<AdminLoginDto>,
) -> Result<SuccessResponse<AdminTokenReadDto>, ApiError> {
    let admin = state
        .admin_repo
        .find_by_email(payload.email.clone())
        .await
        .ok_or_else(|| {
            warn!("Admin login failed - account not found");
            AdminError::InvalidCredentials
        })?;

    match state.admin_service.verify_password(&admin, &payload.password)? {
        true => {
            let token = state.token_service.generate_token(admin.id, ROLE_ADMIN)?;
            info!("Admin login successful: {}", admin.id);
            Ok(SuccessResponse::send(AdminTokenReadDto {
                token: token.token,
                iat: token.iat,
                exp: token.exp,
                admin_id: admin.id,
            }))
        }
        false => {
            warn!("Invalid admin password for email: {}", payload.email);
            Err(AdminError::InvalidCredentials)?
        }
    }
}

pub async fn admin_profile(
    Extension(current_admin): Extension<Admin>,
) -> SuccessResponse<AdminReadDto> {
    SuccessResponse::send(AdminReadDto::from(current_admin))
}

pub async fn dashboard(
    State(state): State<AdminState>,
) -> Result<SuccessResponse<DashboardReadDto>, ApiError> {
    let total_patients = state.patient_repo.count().await.map_err(|e| {
        secure_log::secure_error!("Failed to count patients", e);
        ApiError::Db(DbError::SomethingWentWrong("Failed to load dashboard".to_string()))
    })?;
    let total_reports = state.report_repo.count().await.map_err(|e| {
        secure_log::secure_error!("Failed to count reports", e);
        ApiError::Db(DbError::SomethingWentWrong("Failed to load dashboard".to_string()))
    })?;

    Ok(SuccessResponse::send(DashboardReadDto {
        total_patients,
        total_reports,
    }))
}

pub async fn patient_feedback(
    State(state): State<AdminState>,
) -> Result<SuccessResponse<Vec<FeedbackWithPatientDto>>, ApiError> {
    let feedback = state.feedback_repo.find_all_with_patient().await.map_err(|e| {
        secure_log::secure_error!("Failed to fetch feedback", e);
        ApiError::Db(DbError::SomethingWentWrong("Failed to fetch feedback".to_string()))
    })?;

    Ok(SuccessResponse::send(feedback))
}

pub async fn all_patients(
    State(state): State<AdminState>,
) -> Result<SuccessResponse<Vec<PatientReadDto>>, ApiError> {
    let patients = state.patient_repo.find_all().await.map_err(|e| {
        secure_log::secure_error!("Failed to fetch patients", e);
        ApiError::Db(DbError::SomethingWentWrong("Failed to fetch patients".to_string()))
    })?;

    Ok(SuccessResponse::send(
        patients.into_iter().map(PatientReadDto::from).collect(),
    ))
}

pub async fn update_patient_status(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
    ValidatedRequest(payload): ValidatedRequest<PatientStatusUpdateDto>,
) -> Result<SuccessResponse<String>, ApiError> {
    if payload.status != STATUS_ACTIVE && payload.status != STATUS_DEACTIVATED {
        return Err(PatientError::InvalidStatus)?;
    }

    let updated = state
        .patient_repo
        .update_status(id, &payload.status)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Failed to update patient status", e);
            ApiError::Db(DbError::SomethingWentWrong("Failed to update status".to_string()))
        })?;

    if !updated {
        return Err(PatientError::PatientNotFound)?;
    }

    info!("Patient {} status set to {}", id, payload.status);
    Ok(SuccessResponse::send(format!("Patient {} successfully", payload.status)))
}

pub async fn delete_patient(
    State(state): State<AdminState>,
    Path(id): Path<Uuid>,
) -> Result<SuccessResponse<String>, ApiError> {
    let deleted = state.patient_repo.delete(id).await.map_err(|e| {
        secure_log::secure_error!("Failed to delete patient", e);
        ApiError::Db(DbError::SomethingWentWrong("Failed to delete patient".to_string()))
    })?;

    if !deleted {
        return Err(PatientError::PatientNotFound)?;
    }

    info!("Patient {} deleted", id);
    Ok(SuccessResponse::send("Patient deleted successfully".to_string()))
}
