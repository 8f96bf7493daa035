//! `AuthUser` extractor: validates the bearer token and injects the caller's context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use sitehub_auth::JwtDecoder;
use sitehub_core::error::AppError;
use sitehub_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Decodes an access token into a request context.
pub fn context_from_token(decoder: &JwtDecoder, token: &str) -> Result<RequestContext, AppError> {
    let claims = decoder.decode_access_token(token)?;
    Ok(RequestContext::new(
        claims.user_id(),
        claims.username,
        claims.role,
    ))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::authentication("Missing or malformed Authorization header"))?;

        let ctx = context_from_token(&state.jwt_decoder, bearer.token())?;
        Ok(AuthUser(ctx))
    }
}
