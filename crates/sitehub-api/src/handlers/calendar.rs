//! Calendar event handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use sitehub_entity::calendar::CalendarEvent;

use crate::dto::query::CalendarQuery;
use crate::dto::request::{CreateEventRequest, UpdateEventRequest};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, ValidJson};
use crate::state::AppState;

/// GET /api/calendar/events?from=..&to=..&project_id=..
pub async fn list_events(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarEvent>>, ApiError> {
    let events = state
        .calendar_service
        .list(&auth, query.from, query.to, query.project_id)
        .await?;
    Ok(Json(events))
}

/// GET /api/calendar/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<CalendarEvent>, ApiError> {
    Ok(Json(state.calendar_service.get(&auth, id).await?))
}

/// POST /api/calendar/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<CalendarEvent>), ApiError> {
    let event = state.calendar_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/calendar/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidJson(req): ValidJson<UpdateEventRequest>,
) -> Result<Json<CalendarEvent>, ApiError> {
    let event = state
        .calendar_service
        .update(&auth, id, req.into())
        .await?;
    Ok(Json(event))
}

/// DELETE /api/calendar/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<StatusCode, ApiError> {
    state.calendar_service.delete(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
