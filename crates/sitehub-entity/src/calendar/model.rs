//! Calendar event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled meeting, inspection or milestone.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CalendarEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Details.
    pub description: Option<String>,
    /// Where it happens.
    pub location: Option<String>,
    /// Start time.
    pub starts_at: DateTime<Utc>,
    /// End time, never before `starts_at`.
    pub ends_at: DateTime<Utc>,
    /// Whether the event spans whole days.
    pub all_day: bool,
    /// Creating user.
    pub created_by: Uuid,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to schedule an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCalendarEvent {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Start time.
    pub starts_at: DateTime<Utc>,
    /// End time.
    pub ends_at: DateTime<Utc>,
    /// All-day flag.
    pub all_day: bool,
    /// Creating user.
    pub created_by: Uuid,
}

/// Partial update of an event. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCalendarEvent {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New start time.
    pub starts_at: Option<DateTime<Utc>>,
    /// New end time.
    pub ends_at: Option<DateTime<Utc>>,
    /// New all-day flag.
    pub all_day: Option<bool>,
}
