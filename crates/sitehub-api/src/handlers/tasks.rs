//! Task handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use sitehub_core::types::PageResponse;
use sitehub_entity::task::Task;

use crate::dto::query::TaskListQuery;
use crate::dto::request::{CreateTaskRequest, UpdateTaskRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, PaginationParams, ValidJson};
use crate::state::AppState;

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<PageResponse<Task>>, ApiError> {
    let tasks = state
        .task_service
        .list(&auth, &query.into(), params.into_page_request())
        .await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.task_service.get(&auth, id).await?))
}

/// POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.task_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidJson(req): ValidJson<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = state.task_service.update(&auth, id, req.into()).await?;
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.task_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
