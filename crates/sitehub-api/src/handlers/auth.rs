//! Authentication handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use sitehub_entity::user::User;
use sitehub_service::user::LoginResponse;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = state
        .auth_service
        .login(&req.username, &req.password)
        .await?;
    Ok(Json(response))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.auth_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<User>, ApiError> {
    let user = state.auth_service.me(&auth).await?;
    Ok(Json(user))
}
