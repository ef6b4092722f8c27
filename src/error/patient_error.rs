use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatientError {
    #[error("Patient not found")]
    PatientNotFound,
    #[error("Patient already exists")]
    PatientAlreadyExists,
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Invalid status value")]
    InvalidStatus,
}

impl IntoResponse for PatientError {
    fn into_response(self) -> Response {
        let status_code = match self {
            PatientError::PatientNotFound => StatusCode::NOT_FOUND,
            PatientError::PatientAlreadyExists => StatusCode::BAD_REQUEST,
            PatientError::InvalidCredentials => StatusCode::BAD_REQUEST,
            PatientError::InvalidStatus => StatusCode::BAD_REQUEST,
        };

        ErrorResponse::send(self.to_string())
            .with_status(status_code)
            .into_response()
    }
}
