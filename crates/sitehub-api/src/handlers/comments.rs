//! Comment handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use sitehub_entity::comment::Comment;

use crate::dto::query::CommentListQuery;
use crate::dto::request::CreateCommentRequest;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, ValidJson};
use crate::state::AppState;

/// GET /api/comments?target_type=..&target_id=..
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CommentListQuery>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let comments = state
        .comment_service
        .list(&auth, query.target_type, query.target_id)
        .await?;
    Ok(Json(comments))
}

/// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = state.comment_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.comment_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
