//! Query-string filters for list endpoints.
//!
//! Paging is extracted separately through [`PaginationParams`](crate::extractors::PaginationParams).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use sitehub_database::store::{IssueFilter, TaskFilter};
use sitehub_database::store::DocumentFilter;
use sitehub_entity::activity::ActivityFilter;
use sitehub_entity::comment::CommentTarget;
use sitehub_entity::document::DocumentStatus;
use sitehub_entity::issue::IssueStatus;
use sitehub_entity::project::ProjectStatus;
use sitehub_entity::task::TaskStatus;
use sitehub_entity::user::UserRole;

/// `GET /api/users` filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserListQuery {
    /// Role.
    pub role: Option<UserRole>,
    /// Username, display name or email substring.
    pub search: Option<String>,
}

/// `GET /api/projects` filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListQuery {
    /// Status.
    pub status: Option<ProjectStatus>,
    /// Name or code substring.
    pub search: Option<String>,
}

/// `GET /api/documents` filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentListQuery {
    pub project_id: Option<Uuid>,
    pub status: Option<DocumentStatus>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl From<DocumentListQuery> for DocumentFilter {
    fn from(q: DocumentListQuery) -> Self {
        Self {
            project_id: q.project_id,
            status: q.status,
            category: q.category,
            search: q.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// `GET /api/tasks` filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListQuery {
    pub project_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
    pub status: Option<TaskStatus>,
}

impl From<TaskListQuery> for TaskFilter {
    fn from(q: TaskListQuery) -> Self {
        Self {
            project_id: q.project_id,
            assignee_id: q.assignee_id,
            status: q.status,
        }
    }
}

/// `GET /api/issues` filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueListQuery {
    pub project_id: Option<Uuid>,
    pub document_id: Option<Uuid>,
    pub status: Option<IssueStatus>,
}

impl From<IssueListQuery> for IssueFilter {
    fn from(q: IssueListQuery) -> Self {
        Self {
            project_id: q.project_id,
            document_id: q.document_id,
            status: q.status,
        }
    }
}

/// `GET /api/calendar/events` window.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarQuery {
    /// Window start (inclusive).
    pub from: Option<DateTime<Utc>>,
    /// Window end (exclusive).
    pub to: Option<DateTime<Utc>>,
    pub project_id: Option<Uuid>,
}

/// `GET /api/comments` target.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentListQuery {
    pub target_type: CommentTarget,
    pub target_id: Uuid,
}

/// `GET /api/activity-logs` filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityQuery {
    pub project_id: Option<Uuid>,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub actor_id: Option<Uuid>,
}

impl From<ActivityQuery> for ActivityFilter {
    fn from(q: ActivityQuery) -> Self {
        Self {
            project_id: q.project_id,
            entity_type: q.entity_type,
            entity_id: q.entity_id,
            actor_id: q.actor_id,
        }
    }
}
