//! Calendar events.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sitehub_auth::{RbacEnforcer, SystemPermission};
use sitehub_core::error::AppError;
use sitehub_core::events::EventName;
use sitehub_core::traits::EventPublisher;
use sitehub_database::store::CalendarStore;
use sitehub_entity::activity::NewActivity;
use sitehub_entity::calendar::{CalendarEvent, CreateCalendarEvent, UpdateCalendarEvent};

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;
use crate::notify;

/// Request to schedule an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Start.
    pub starts_at: DateTime<Utc>,
    /// End; must not precede the start.
    pub ends_at: DateTime<Utc>,
    /// All-day flag.
    #[serde(default)]
    pub all_day: bool,
}

/// Payload of `calendar:event:deleted`.
#[derive(Debug, Clone, Serialize)]
struct DeletedEvent {
    id: Uuid,
}

fn check_range(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<(), AppError> {
    if ends_at < starts_at {
        Err(AppError::validation("ends_at must not be before starts_at"))
    } else {
        Ok(())
    }
}

/// Merge set fields of `changes` into `event`.
fn apply_changes(event: &mut CalendarEvent, changes: UpdateCalendarEvent) {
    if let Some(title) = changes.title {
        event.title = title;
    }
    if changes.description.is_some() {
        event.description = changes.description;
    }
    if changes.location.is_some() {
        event.location = changes.location;
    }
    if let Some(starts_at) = changes.starts_at {
        event.starts_at = starts_at;
    }
    if let Some(ends_at) = changes.ends_at {
        event.ends_at = ends_at;
    }
    if let Some(all_day) = changes.all_day {
        event.all_day = all_day;
    }
}

/// Manages calendar events.
#[derive(Debug, Clone)]
pub struct CalendarService {
    calendar_repo: Arc<dyn CalendarStore>,
    events: Arc<dyn EventPublisher>,
    rbac: Arc<RbacEnforcer>,
    activity: ActivityRecorder,
}

impl CalendarService {
    /// Creates a new calendar service.
    pub fn new(
        calendar_repo: Arc<dyn CalendarStore>,
        events: Arc<dyn EventPublisher>,
        rbac: Arc<RbacEnforcer>,
        activity: ActivityRecorder,
    ) -> Self {
        Self {
            calendar_repo,
            events,
            rbac,
            activity,
        }
    }

    /// Events overlapping `[from, to)`, optionally within one project.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        project_id: Option<Uuid>,
    ) -> Result<Vec<CalendarEvent>, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        if let (Some(from), Some(to)) = (from, to) {
            check_range(from, to)?;
        }
        self.calendar_repo.find_in_window(from, to, project_id).await
    }

    /// Gets an event.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<CalendarEvent, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        self.calendar_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Calendar event {id} not found")))
    }

    /// Schedules an event and emits `calendar:event:created`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateEventRequest,
    ) -> Result<CalendarEvent, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::WorkItemWrite)?;
        if req.title.trim().is_empty() {
            return Err(AppError::validation("title must not be empty"));
        }
        check_range(req.starts_at, req.ends_at)?;

        let event = self
            .calendar_repo
            .create(&CreateCalendarEvent {
                project_id: req.project_id,
                title: req.title.trim().to_string(),
                description: req.description,
                location: req.location,
                starts_at: req.starts_at,
                ends_at: req.ends_at,
                all_day: req.all_day,
                created_by: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, event_id = %event.id, "Calendar event created");
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "calendar.create", "calendar_event", event.id)
                    .in_project(event.project_id),
            )
            .await;
        notify::publish(
            self.events.as_ref(),
            EventName::CalendarEventCreated,
            ctx.user_id,
            &event,
        );
        Ok(event)
    }

    /// Updates an event and emits `calendar:event:updated`.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: UpdateCalendarEvent,
    ) -> Result<CalendarEvent, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::WorkItemWrite)?;
        if changes.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::validation("title must not be empty"));
        }

        let mut event = self.get(ctx, id).await?;
        apply_changes(&mut event, changes);
        check_range(event.starts_at, event.ends_at)?;

        let event = self.calendar_repo.save(&event).await?;
        info!(user_id = %ctx.user_id, event_id = %id, "Calendar event updated");
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "calendar.update", "calendar_event", id)
                    .in_project(event.project_id),
            )
            .await;
        notify::publish(
            self.events.as_ref(),
            EventName::CalendarEventUpdated,
            ctx.user_id,
            &event,
        );
        Ok(event)
    }

    /// Deletes an event and emits `calendar:event:deleted` with `{id}`.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::WorkItemDelete)?;
        let event = self.get(ctx, id).await?;
        self.calendar_repo.delete(id).await?;

        info!(user_id = %ctx.user_id, event_id = %id, "Calendar event deleted");
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "calendar.delete", "calendar_event", id)
                    .in_project(event.project_id),
            )
            .await;
        notify::publish(
            self.events.as_ref(),
            EventName::CalendarEventDeleted,
            ctx.user_id,
            &DeletedEvent { id },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sitehub_core::error::ErrorKind;
    use sitehub_core::traits::NoopPublisher;
    use sitehub_database::store::{MemoryActivityStore, MemoryCalendarStore};
    use sitehub_entity::user::UserRole;

    fn service() -> CalendarService {
        CalendarService::new(
            Arc::new(MemoryCalendarStore::new()),
            Arc::new(NoopPublisher),
            Arc::new(RbacEnforcer::new()),
            ActivityRecorder::new(Arc::new(MemoryActivityStore::new())),
        )
    }

    fn contributor() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), "site.engineer", UserRole::Contributor)
    }

    fn pour(starts_at: DateTime<Utc>) -> CreateEventRequest {
        CreateEventRequest {
            project_id: None,
            title: "Concrete pour".into(),
            description: None,
            location: Some("Level 3".into()),
            starts_at,
            ends_at: starts_at + Duration::hours(4),
            all_day: false,
        }
    }

    fn event() -> CalendarEvent {
        let now = Utc::now();
        CalendarEvent {
            id: Uuid::new_v4(),
            project_id: None,
            title: "Concrete pour".into(),
            description: None,
            location: Some("Level 3".into()),
            starts_at: now,
            ends_at: now + Duration::hours(4),
            all_day: false,
            created_by: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_changes_keeps_unset_fields() {
        let mut ev = event();
        let original_end = ev.ends_at;
        apply_changes(
            &mut ev,
            UpdateCalendarEvent {
                title: Some("Pour postponed".into()),
                all_day: Some(true),
                ..Default::default()
            },
        );
        assert_eq!(ev.title, "Pour postponed");
        assert!(ev.all_day);
        assert_eq!(ev.ends_at, original_end);
        assert_eq!(ev.location.as_deref(), Some("Level 3"));
    }

    #[test]
    fn test_moved_start_past_end_is_invalid() {
        let mut ev = event();
        let new_start = ev.ends_at + Duration::hours(1);
        apply_changes(
            &mut ev,
            UpdateCalendarEvent {
                starts_at: Some(new_start),
                ..Default::default()
            },
        );
        assert!(check_range(ev.starts_at, ev.ends_at).is_err());
        assert!(check_range(ev.starts_at, ev.starts_at).is_ok());
    }

    #[tokio::test]
    async fn test_update_with_end_before_start_is_rejected() {
        let svc = service();
        let ctx = contributor();
        let created = svc.create(&ctx, pour(Utc::now())).await.unwrap();

        let err = svc
            .update(
                &ctx,
                created.id,
                UpdateCalendarEvent {
                    ends_at: Some(created.starts_at - Duration::minutes(30)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let stored = svc.get(&ctx, created.id).await.unwrap();
        assert_eq!(stored.ends_at, created.ends_at);
    }

    #[tokio::test]
    async fn test_update_moving_both_bounds_is_accepted() {
        let svc = service();
        let ctx = contributor();
        let created = svc.create(&ctx, pour(Utc::now())).await.unwrap();
        let next_day = created.starts_at + Duration::days(1);

        let moved = svc
            .update(
                &ctx,
                created.id,
                UpdateCalendarEvent {
                    starts_at: Some(next_day),
                    ends_at: Some(next_day + Duration::hours(2)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.starts_at, next_day);
        assert_eq!(moved.location.as_deref(), Some("Level 3"));
    }

    #[tokio::test]
    async fn test_create_with_end_before_start_is_rejected() {
        let mut req = pour(Utc::now());
        req.ends_at = req.starts_at - Duration::hours(1);
        let err = service().create(&contributor(), req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
