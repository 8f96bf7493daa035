//! Serves stored upload files under `/uploads/{key}`.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use sitehub_storage::content_type_for;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /uploads/{*key}
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let data = state.storage.read_bytes(&key).await?;
    let content_type = content_type_for(&key);
    Ok(([(header::CONTENT_TYPE, content_type)], data).into_response())
}
