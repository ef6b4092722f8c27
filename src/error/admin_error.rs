use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Admin not found")]
    AdminNotFound,
    #[error("Admin already exists")]
    AdminAlreadyExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status_code = match self {
            AdminError::AdminNotFound => StatusCode::NOT_FOUND,
            AdminError::AdminAlreadyExists => StatusCode::BAD_REQUEST,
            AdminError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        };

        ErrorResponse::send(self.to_string())
            .with_status(status_code)
            .into_response()
    }
}
