use crate::config::logging::secure_log;
use crate::dto::token_dto::ROLE_PATIENT;
use crate::error::{token_error::TokenError, AppError};
use crate::repository::patient_repository::PatientRepositoryTrait;
use crate::service::token_service::TokenServiceTrait;
use crate::state::token_state::TokenState;
use axum::extract::State;
use axum::{http, http::Request, middleware::Next, response::IntoResponse};
use jsonwebtoken::errors::ErrorKind;
use tracing::info;

/// Pull the token out of an Authorization header value. Only the Bearer
/// scheme is accepted.
pub(crate) fn extract_bearer(header: Option<&str>) -> Result<&str, TokenError> {
    let token = header
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(TokenError::MissingToken)?;

    if token.is_empty() {
        return Err(TokenError::InvalidToken);
    }

    Ok(token)
}

/// Patient authentication gate. Verifies the bearer token, requires the
/// patient role, re-resolves the subject against the patient store and
/// attaches the loaded `Patient` to the request.
pub async fn auth(
    State(state): State<TokenState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let token = extract_bearer(auth_header).map_err(|e| {
        secure_log::secure_error!("Rejected request", e);
        e
    })?;

    match state.token_service.retrieve_token_claims(token) {
        Ok(token_data) => {
            if token_data.claims.role != ROLE_PATIENT {
                secure_log::secure_error!(
                    "SECURITY: Non-patient token presented to patient gate",
                    token_data.claims.sub
                );
                return Err(TokenError::InvalidToken)?;
            }

            match state.patient_repo.find(token_data.claims.sub).await {
                Ok(patient) => {
                    info!("SECURITY: Authentication successful for patient ID: {}", patient.id);
                    req.extensions_mut().insert(patient);
                    Ok(next.run(req).await)
                }
                Err(sqlx::Error::RowNotFound) => {
                    secure_log::secure_error!(
                        "SECURITY: Token subject no longer resolves to a patient",
                        token_data.claims.sub
                    );
                    Err(TokenError::PrincipalNotFound)?
                }
                Err(e) => {
                    secure_log::secure_error!("Patient lookup failed during authentication", e);
                    Err(AppError::Database(e))
                }
            }
        }
        Err(err) => match err.kind() {
            ErrorKind::ExpiredSignature => {
                secure_log::secure_error!("Expired JWT token");
                Err(TokenError::TokenExpired)?
            }
            _ => {
                secure_log::secure_error!("Invalid JWT token");
                Err(TokenError::InvalidToken)?
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_header_is_missing_token() {
        assert_eq!(extract_bearer(None), Err(TokenError::MissingToken));
    }

    #[test]
    fn test_non_bearer_scheme_is_missing_token() {
        assert_eq!(
            extract_bearer(Some("Basic dXNlcjpwYXNz")),
            Err(TokenError::MissingToken)
        );
    }

    #[test]
    fn test_empty_bearer_token_is_invalid() {
        assert_eq!(extract_bearer(Some("Bearer ")), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_bearer_token_is_extracted() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }
}
