//! Issue handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use sitehub_core::types::PageResponse;
use sitehub_entity::issue::Issue;

use crate::dto::query::IssueListQuery;
use crate::dto::request::{CreateIssueRequest, UpdateIssueRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, PaginationParams, ValidJson};
use crate::state::AppState;

/// GET /api/issues
pub async fn list_issues(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<IssueListQuery>,
) -> Result<Json<PageResponse<Issue>>, ApiError> {
    let issues = state
        .issue_service
        .list(&auth, &query.into(), params.into_page_request())
        .await?;
    Ok(Json(issues))
}

/// GET /api/issues/{id}
pub async fn get_issue(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<Issue>, ApiError> {
    Ok(Json(state.issue_service.get(&auth, id).await?))
}

/// POST /api/issues
pub async fn create_issue(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateIssueRequest>,
) -> Result<(StatusCode, Json<Issue>), ApiError> {
    let issue = state.issue_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(issue)))
}

/// PUT /api/issues/{id}
pub async fn update_issue(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidJson(req): ValidJson<UpdateIssueRequest>,
) -> Result<Json<Issue>, ApiError> {
    let issue = state.issue_service.update(&auth, id, req.into()).await?;
    Ok(Json(issue))
}

/// DELETE /api/issues/{id}
pub async fn delete_issue(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.issue_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
