use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Per-recipient notification delivery failures.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    SendFailed(String),
    #[error("Notification delivery timed out")]
    Timeout,
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),
    #[error("Mail transport error: {0}")]
    Transport(String),
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        let status_code = match self {
            NotifyError::InvalidRecipient(_) => StatusCode::BAD_REQUEST,
            NotifyError::SendFailed(_) => StatusCode::BAD_GATEWAY,
            NotifyError::Timeout => StatusCode::BAD_GATEWAY,
            NotifyError::Transport(_) => StatusCode::BAD_GATEWAY,
        };

        ErrorResponse::send(self.to_string())
            .with_status(status_code)
            .into_response()
    }
}
