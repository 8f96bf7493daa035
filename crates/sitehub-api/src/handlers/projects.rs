//! Project handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use sitehub_core::types::PageResponse;
use sitehub_entity::project::{Project, ProjectSummary};

use crate::dto::query::ProjectListQuery;
use crate::dto::request::{CreateProjectRequest, UpdateProjectRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, PaginationParams, ValidJson};
use crate::state::AppState;

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<PageResponse<Project>>, ApiError> {
    let projects = state
        .project_service
        .list(
            &auth,
            query.status,
            query.search.as_deref(),
            params.into_page_request(),
        )
        .await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<Project>, ApiError> {
    let project = state.project_service.get(&auth, id).await?;
    Ok(Json(project))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let project = state.project_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidJson(req): ValidJson<UpdateProjectRequest>,
) -> Result<Json<Project>, ApiError> {
    let project = state.project_service.update(&auth, id, req.into()).await?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.project_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/projects/{id}/summary
pub async fn project_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<ProjectSummary>, ApiError> {
    let summary = state.project_service.summary(&auth, id).await?;
    Ok(Json(summary))
}
