use crate::config::logging::secure_log;
use crate::dto::token_dto::ROLE_ADMIN;
use crate::error::{token_error::TokenError, AppError};
use crate::middleware::auth::extract_bearer;
use crate::repository::admin_repository::AdminRepositoryTrait;
use crate::service::token_service::TokenServiceTrait;
use crate::state::token_state::TokenState;
use axum::extract::State;
use axum::{http, http::Request, middleware::Next, response::IntoResponse};
use jsonwebtoken::errors::ErrorKind;
use tracing::info;

/// Admin authentication gate. Same contract as the patient gate, but the
/// subject must still resolve to an existing admin account, so a deleted
/// admin's token stops working before its expiry.
pub async fn admin_auth(
    State(state): State<TokenState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let token = extract_bearer(auth_header).map_err(|e| {
        secure_log::secure_error!("Rejected admin request", e);
        e
    })?;

    match state.token_service.retrieve_token_claims(token) {
        Ok(token_data) => {
            if token_data.claims.role != ROLE_ADMIN {
                secure_log::secure_error!(
                    "SECURITY: Non-admin token presented to admin gate",
                    token_data.claims.sub
                );
                return Err(TokenError::InvalidToken)?;
            }

            match state.admin_repo.find(token_data.claims.sub).await {
                Ok(admin) => {
                    info!("SECURITY: Authentication successful for admin ID: {}", admin.id);
                    req.extensions_mut().insert(admin);
                    Ok(next.run(req).await)
                }
                Err(sqlx::Error::RowNotFound) => {
                    secure_log::secure_error!(
                        "SECURITY: Token subject no longer resolves to an admin",
                        token_data.claims.sub
                    );
                    Err(TokenError::PrincipalNotFound)?
                }
                Err(e) => {
                    secure_log::secure_error!("Admin lookup failed during authentication", e);
                    Err(AppError::Database(e))
                }
            }
        }
        Err(err) => match err.kind() {
            ErrorKind::ExpiredSignature => {
                secure_log::secure_error!("Expired admin JWT token");
                Err(TokenError::TokenExpired)?
            }
            _ => {
                secure_log::secure_error!("Invalid admin JWT token");
                Err(TokenError::InvalidToken)?
            }
        },
    }
}
