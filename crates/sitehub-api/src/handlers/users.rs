//! Admin user management handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use sitehub_core::types::PageResponse;
use sitehub_entity::user::User;
use sitehub_service::user::RolePermissions;

use crate::dto::query::UserListQuery;
use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, PaginationParams, ValidJson};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<PageResponse<User>>, ApiError> {
    let users = state
        .admin_user_service
        .list_users(
            &auth,
            query.role,
            query.search.as_deref(),
            params.into_page_request(),
        )
        .await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<User>, ApiError> {
    let user = state.admin_user_service.get_user(&auth, id).await?;
    Ok(Json(user))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .admin_user_service
        .create_user(&auth, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .admin_user_service
        .update_user(&auth, id, req.into())
        .await?;
    Ok(Json(user))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.admin_user_service.delete_user(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/roles
pub async fn list_roles(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<RolePermissions>>, ApiError> {
    let roles = state.admin_user_service.roles(&auth)?;
    Ok(Json(roles))
}
