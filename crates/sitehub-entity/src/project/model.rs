//! Project entity model.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Delivery stage of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Not started on site.
    #[default]
    Planning,
    /// Under construction.
    Active,
    /// Paused.
    OnHold,
    /// Handed over.
    Completed,
    /// Closed out and read-only.
    Archived,
}

impl ProjectStatus {
    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A construction project that documents, tasks and issues belong to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: Uuid,
    /// Short unique code, used as the ISO 19650 project field.
    pub code: String,
    /// Project name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Delivery stage.
    pub status: ProjectStatus,
    /// Site address or location.
    pub location: Option<String>,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned completion date.
    pub end_date: Option<NaiveDate>,
    /// Owning user.
    pub owner_id: Option<Uuid>,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project code.
    pub code: String,
    /// Project name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Initial status.
    pub status: ProjectStatus,
    /// Location.
    pub location: Option<String>,
    /// Start date.
    pub start_date: Option<NaiveDate>,
    /// End date.
    pub end_date: Option<NaiveDate>,
    /// Owning user.
    pub owner_id: Option<Uuid>,
}

/// Partial update of a project. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New status.
    pub status: Option<ProjectStatus>,
    /// New location.
    pub location: Option<String>,
    /// New start date.
    pub start_date: Option<NaiveDate>,
    /// New end date.
    pub end_date: Option<NaiveDate>,
}

/// Dashboard counters for one project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// The project.
    pub project_id: Uuid,
    /// Document count keyed by status (`WIP`, `Shared`, ...).
    pub documents_by_status: BTreeMap<String, i64>,
    /// Tasks not yet done.
    pub open_tasks: i64,
    /// Issues not resolved or closed.
    pub open_issues: i64,
    /// Calendar events starting in the next 14 days.
    pub upcoming_events: i64,
}
