use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Report not found")]
    ReportNotFound,
    #[error("File not found on server")]
    FileMissing,
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let status_code = match self {
            ReportError::ReportNotFound => StatusCode::NOT_FOUND,
            ReportError::FileMissing => StatusCode::NOT_FOUND,
        };

        ErrorResponse::send(self.to_string())
            .with_status(status_code)
            .into_response()
    }
}
