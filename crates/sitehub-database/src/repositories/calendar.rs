//! Calendar event repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use sitehub_core::error::{AppError, ErrorKind};
use sitehub_core::result::AppResult;
use sitehub_entity::calendar::{CalendarEvent, CreateCalendarEvent};

use crate::store::CalendarStore;

/// Repository for calendar events.
#[derive(Debug, Clone)]
pub struct CalendarRepository {
    pool: PgPool,
}

impl CalendarRepository {
    /// Create a new calendar repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarStore for CalendarRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CalendarEvent>> {
        sqlx::query_as::<_, CalendarEvent>("SELECT * FROM calendar_events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    async fn find_in_window(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        project_id: Option<Uuid>,
    ) -> AppResult<Vec<CalendarEvent>> {
        sqlx::query_as::<_, CalendarEvent>(
            "SELECT * FROM calendar_events \
             WHERE ($1::timestamptz IS NULL OR ends_at >= $1) \
               AND ($2::timestamptz IS NULL OR starts_at < $2) \
               AND ($3::uuid IS NULL OR project_id = $3) \
             ORDER BY starts_at ASC \
             LIMIT 1000",
        )
        .bind(from)
        .bind(to)
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))
    }

    async fn create(&self, data: &CreateCalendarEvent) -> AppResult<CalendarEvent> {
        sqlx::query_as::<_, CalendarEvent>(
            "INSERT INTO calendar_events (project_id, title, description, location, starts_at, ends_at, all_day, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.project_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(data.starts_at)
        .bind(data.ends_at)
        .bind(data.all_day)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::validation("Referenced project does not exist")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create event", e),
        })
    }

    async fn save(&self, event: &CalendarEvent) -> AppResult<CalendarEvent> {
        sqlx::query_as::<_, CalendarEvent>(
            "UPDATE calendar_events SET title = $2, description = $3, location = $4, \
                                        starts_at = $5, ends_at = $6, all_day = $7, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.all_day)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update event", e))?
        .ok_or_else(|| AppError::not_found(format!("Calendar event {} not found", event.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM calendar_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete event", e))?;
        Ok(result.rows_affected() > 0)
    }
}
