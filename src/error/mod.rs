pub(crate) mod admin_error;
pub(crate) mod api_error;
pub(crate) mod db_error;
pub(crate) mod notify_error;
pub(crate) mod patient_error;
pub(crate) mod reminder_error;
pub(crate) mod report_error;
pub(crate) mod request_error;
pub(crate) mod token_error;

// Unified error type for the middleware and startup paths; handler-level
// failures flow through api_error::ApiError instead.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Token(#[from] token_error::TokenError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use crate::response::app_response::ErrorResponse;
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        match self {
            AppError::Token(error) => error.into_response(),
            AppError::Database(_) => ErrorResponse::send("Database error".to_string())
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            AppError::Config(_) => ErrorResponse::send("Configuration error".to_string())
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
        }
    }
}
