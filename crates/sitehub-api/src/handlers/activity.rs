//! Activity log handler.

use axum::Json;
use axum::extract::{Query, State};

use sitehub_core::types::PageResponse;
use sitehub_entity::activity::ActivityLog;

use crate::dto::query::ActivityQuery;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/activity-logs
pub async fn list_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<PageResponse<ActivityLog>>, ApiError> {
    let entries = state
        .activity_service
        .search(&auth, &query.into(), params.into_page_request())
        .await?;
    Ok(Json(entries))
}
