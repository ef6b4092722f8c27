use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles carried in the token payload.
pub const ROLE_PATIENT: &str = "patient";
pub const ROLE_ADMIN: &str = "admin";

#[derive(Clone, Serialize, Deserialize)]
pub struct TokenReadDto {
    pub token: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenClaimsDto {
    pub sub: Uuid,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub iss: String,
    pub aud: String,
}
