//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use sitehub_core::config::AuthConfig;
use sitehub_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token (signature and expiry).
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::authentication("Invalid token format")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use sitehub_core::error::ErrorKind;
    use sitehub_entity::user::UserRole;
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_roundtrip_preserves_claims() {
        let cfg = config("a-very-long-test-secret-value");
        let user_id = Uuid::new_v4();
        let issued = JwtEncoder::new(&cfg)
            .generate_access_token(user_id, UserRole::Manager, "site.manager")
            .expect("encode");

        let claims = JwtDecoder::new(&cfg)
            .decode_access_token(&issued.token)
            .expect("decode");
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.role, UserRole::Manager);
        assert_eq!(claims.username, "site.manager");
        assert!(claims.expires_at() > chrono::Utc::now());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issued = JwtEncoder::new(&config("first-secret-0123456789"))
            .generate_access_token(Uuid::new_v4(), UserRole::Viewer, "v")
            .expect("encode");
        let err = JwtDecoder::new(&config("second-secret-0123456789"))
            .decode_access_token(&issued.token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let err = JwtDecoder::new(&config("first-secret-0123456789"))
            .decode_access_token("not.a.jwt")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
