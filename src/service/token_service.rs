use crate::config::parameter;
use crate::dto::token_dto::{TokenClaimsDto, TokenReadDto};
use crate::error::token_error::TokenError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use uuid::Uuid;

const ISSUER: &str = "healthstore";
const AUDIENCE: &str = "healthstore-clients";

#[derive(Clone)]
pub struct TokenService {
    secret: String,
    token_expiration_minutes: i64,
}

pub trait TokenServiceTrait {
    fn new() -> Result<Self, TokenError>
    where
        Self: Sized;
    fn with_settings(secret: String, token_expiration_minutes: i64) -> Result<Self, TokenError>
    where
        Self: Sized;
    fn retrieve_token_claims(
        &self,
        token: &str,
    ) -> jsonwebtoken::errors::Result<TokenData<TokenClaimsDto>>;
    fn generate_token(&self, subject: Uuid, role: &str) -> Result<TokenReadDto, TokenError>;
}

impl TokenServiceTrait for TokenService {
    fn new() -> Result<Self, TokenError> {
        let secret = parameter::get_optional("JWT_SECRET").ok_or_else(|| {
            TokenError::TokenCreationError("JWT_SECRET is not configured".to_string())
        })?;

        Self::with_settings(secret, parameter::get_i64("JWT_TTL_IN_MINUTES"))
    }

    fn with_settings(secret: String, token_expiration_minutes: i64) -> Result<Self, TokenError> {
        // 256-bit minimum for the HS256 signing secret
        if secret.len() < 32 {
            return Err(TokenError::TokenCreationError(format!(
                "JWT secret must be at least 32 bytes (256 bits). Current length: {}",
                secret.len()
            )));
        }

        Ok(Self {
            secret,
            token_expiration_minutes,
        })
    }

    fn retrieve_token_claims(
        &self,
        token: &str,
    ) -> jsonwebtoken::errors::Result<TokenData<TokenClaimsDto>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_audience(&[AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 30; // seconds of clock skew tolerance

        decode::<TokenClaimsDto>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &validation,
        )
    }

    fn generate_token(&self, subject: Uuid, role: &str) -> Result<TokenReadDto, TokenError> {
        let iat = chrono::Utc::now().timestamp();
        let exp = chrono::Utc::now()
            .checked_add_signed(chrono::Duration::minutes(self.token_expiration_minutes))
            .ok_or_else(|| {
                TokenError::TokenCreationError("Token expiration calculation overflow".to_string())
            })?
            .timestamp();

        let claims = TokenClaimsDto {
            sub: subject,
            role: role.to_string(),
            iat,
            exp,
            jti: Uuid::now_v7().to_string(),
            iss: ISSUER.to_string(),
            aud: AUDIENCE.to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| TokenError::TokenCreationError(e.to_string()))?;

        Ok(TokenReadDto { token, iat, exp })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::token_dto::ROLE_PATIENT;
    use jsonwebtoken::errors::ErrorKind;

    const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

    fn service() -> TokenService {
        TokenService::with_settings(TEST_SECRET.to_string(), 30).unwrap()
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = TokenService::with_settings("too-short".to_string(), 30);
        assert!(matches!(result, Err(TokenError::TokenCreationError(_))));
    }

    #[test]
    fn test_generate_and_verify_roundtrip() {
        let service = service();
        let subject = Uuid::now_v7();

        let issued = service.generate_token(subject, ROLE_PATIENT).unwrap();
        let data = service.retrieve_token_claims(&issued.token).unwrap();

        assert_eq!(data.claims.sub, subject);
        assert_eq!(data.claims.role, ROLE_PATIENT);
        assert_eq!(data.claims.iat, issued.iat);
        assert_eq!(data.claims.exp, issued.exp);
        assert!(issued.exp > issued.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative TTL puts exp in the past, beyond the 30s leeway
        let service = TokenService::with_settings(TEST_SECRET.to_string(), -5).unwrap();
        let issued = service.generate_token(Uuid::now_v7(), ROLE_PATIENT).unwrap();

        let err = service.retrieve_token_claims(&issued.token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = service().generate_token(Uuid::now_v7(), ROLE_PATIENT).unwrap();

        let other = TokenService::with_settings(
            "a-completely-different-secret-of-enough-length".to_string(),
            30,
        )
        .unwrap();
        let err = other.retrieve_token_claims(&issued.token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert!(service().retrieve_token_claims("not.a.jwt").is_err());
        assert!(service().retrieve_token_claims("").is_err());
    }
}
