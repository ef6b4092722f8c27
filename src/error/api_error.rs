use crate::error::admin_error::AdminError;
use crate::error::db_error::DbError;
use crate::error::notify_error::NotifyError;
use crate::error::patient_error::PatientError;
use crate::error::reminder_error::ReminderError;
use crate::error::report_error::ReportError;
use crate::error::request_error::RequestError;
use crate::error::token_error::TokenError;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Patient(#[from] PatientError),
    #[error(transparent)]
    Admin(#[from] AdminError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error(transparent)]
    Reminder(#[from] ReminderError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Token(error) => error.into_response(),
            ApiError::Patient(error) => error.into_response(),
            ApiError::Admin(error) => error.into_response(),
            ApiError::Db(error) => error.into_response(),
            ApiError::Notify(error) => error.into_response(),
            ApiError::Reminder(error) => error.into_response(),
            ApiError::Report(error) => error.into_response(),
            ApiError::Request(error) => error.into_response(),
        }
    }
}
