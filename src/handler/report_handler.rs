use crate::config::logging::secure_log;
use crate::dto::report_dto::{CommentCreateDto, ReportReadDto};
use crate::entity::patient::Patient;
use crate::entity::report::Report;
use crate::error::api_error::ApiError;
use crate::error::db_error::DbError;
use crate::error::report_error::ReportError;
use crate::error::request_error::{RequestError, ValidatedRequest};
use crate::repository::report_repository::ReportRepositoryTrait;
use crate::response::app_response::SuccessResponse;
use crate::state::report_state::ReportState;
use axum::extract::{Multipart, Path as PathParam, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Multipart report upload: the file itself plus display name, report type
/// and an optional first comment.
pub async fn upload_report(
    State(state): State<ReportState>,
    Extension(current_patient): Extension<Patient>,
    mut multipart: Multipart,
) -> Result<SuccessResponse<ReportReadDto>, ApiError> {
    let mut file_bytes = None;
    let mut original_name = None;
    let mut display_name = None;
    let mut report_type = None;
    let mut initial_comment = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RequestError::Multipart(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                original_name = field.file_name().map(str::to_string);
                file_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| RequestError::Multipart(e.to_string()))?,
                );
            }
            Some("file_name") => display_name = Some(read_text(field).await?),
            Some("report_type") => report_type = Some(read_text(field).await?),
            Some("comments") => initial_comment = Some(read_text(field).await?),
            _ => {}
        }
    }

    let bytes =
        file_bytes.ok_or_else(|| RequestError::Multipart("No file uploaded".to_string()))?;
    let report_type =
        report_type.ok_or_else(|| RequestError::Multipart("report_type is required".to_string()))?;
    let display_name = display_name
        .or_else(|| original_name.clone())
        .ok_or_else(|| RequestError::Multipart("file_name is required".to_string()))?;

    let extension = original_name
        .as_deref()
        .and_then(|name| Path::new(name).extension().and_then(|e| e.to_str()))
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    let stored_name = format!("{}{}", Uuid::now_v7(), extension);

    let store_result = async {
        tokio::fs::create_dir_all(&state.reports_dir).await?;
        tokio::fs::write(state.reports_dir.join(&stored_name), &bytes).await
    }
    .await;
    store_result.map_err(|e| {
        secure_log::secure_error!("Failed to store uploaded report", e);
        ApiError::Db(DbError::SomethingWentWrong(
            "Failed to store uploaded file".to_string(),
        ))
    })?;

    let report = state
        .report_repo
        .insert(current_patient.id, &display_name, &stored_name, &report_type)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Failed to insert report", e);
            ApiError::Db(DbError::SomethingWentWrong("Report upload failed".to_string()))
        })?;

    if let Some(text) = initial_comment.filter(|text| !text.is_empty()) {
        state
            .report_repo
            .add_comment(report.id, &current_patient.first_name, &text)
            .await
            .map_err(|e| {
                secure_log::secure_error!("Failed to add initial report comment", e);
                ApiError::Db(DbError::SomethingWentWrong("Report upload failed".to_string()))
            })?;
    }

    info!("Report {} uploaded for patient ID: {}", report.id, current_patient.id);

    let comments = state.report_repo.comments_for(report.id).await.unwrap_or_default();
    Ok(SuccessResponse::send(ReportReadDto::from(report, comments)).with_status(StatusCode::CREATED))
}

pub async fn get_reports(
    State(state): State<ReportState>,
    Extension(current_patient): Extension<Patient>,
) -> Result<SuccessResponse<Vec<ReportReadDto>>, ApiError> {
    let reports = state
        .report_repo
        .find_by_patient(current_patient.id)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Failed to fetch reports", e);
            ApiError::Db(DbError::SomethingWentWrong("Failed to fetch reports".to_string()))
        })?;

    let mut result = Vec::with_capacity(reports.len());
    for report in reports {
        let comments = state.report_repo.comments_for(report.id).await.map_err(|e| {
            secure_log::secure_error!("Failed to fetch report comments", e);
            ApiError::Db(DbError::SomethingWentWrong("Failed to fetch reports".to_string()))
        })?;
        result.push(ReportReadDto::from(report, comments));
    }

    Ok(SuccessResponse::send(result))
}

pub async fn add_comment(
    State(state): State<ReportState>,
    Extension(current_patient): Extension<Patient>,
    PathParam(report_id): PathParam<Uuid>,
    ValidatedRequest(payload): ValidatedRequest<CommentCreateDto>,
) -> Result<SuccessResponse<ReportReadDto>, ApiError> {
    let report = find_owned_report(&state, report_id, &current_patient).await?;

    state
        .report_repo
        .add_comment(report.id, &payload.author, &payload.text)
        .await
        .map_err(|e| {
            secure_log::secure_error!("Failed to add report comment", e);
            ApiError::Db(DbError::SomethingWentWrong("Failed to add comment".to_string()))
        })?;

    let comments = state.report_repo.comments_for(report.id).await.unwrap_or_default();
    Ok(SuccessResponse::send(ReportReadDto::from(report, comments)))
}

pub async fn download_report(
    State(state): State<ReportState>,
    Extension(current_patient): Extension<Patient>,
    PathParam(report_id): PathParam<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let report = find_owned_report(&state, report_id, &current_patient).await?;

    let path = state.reports_dir.join(&report.stored_file_name);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        secure_log::secure_error!("Report file missing on disk", e);
        ApiError::Report(ReportError::FileMissing)
    })?;

    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report.file_name),
        ),
    ];

    Ok((headers, bytes))
}

/// Resolve a report and check it belongs to the requesting patient. Reports
/// of other patients are indistinguishable from missing ones.
async fn find_owned_report(
    state: &ReportState,
    report_id: Uuid,
    current_patient: &Patient,
) -> Result<Report, ApiError> {
    let report = state.report_repo.find(report_id).await.map_err(|e| match e {
        sqlx::Error::RowNotFound => ApiError::Report(ReportError::ReportNotFound),
        e => {
            secure_log::secure_error!("Failed to fetch report", e);
            ApiError::Db(DbError::SomethingWentWrong("Failed to fetch report".to_string()))
        }
    })?;

    if report.patient_id != current_patient.id {
        return Err(ReportError::ReportNotFound)?;
    }

    Ok(report)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::Request(RequestError::Multipart(e.to_string())))
}
