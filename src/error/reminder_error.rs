use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("A reminder run is already in progress")]
    RunInProgress,
    #[error("Reminder store error: {0}")]
    Store(String),
}

impl IntoResponse for ReminderError {
    fn into_response(self) -> Response {
        let status_code = match self {
            ReminderError::RunInProgress => StatusCode::CONFLICT,
            ReminderError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        ErrorResponse::send(self.to_string())
            .with_status(status_code)
            .into_response()
    }
}
