//! Activity log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable record of a user action.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityLog {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The user who performed the action.
    pub actor_id: Option<Uuid>,
    /// Project the action relates to.
    pub project_id: Option<Uuid>,
    /// Action name (e.g. `"document.upload"`, `"task.create"`).
    pub action: String,
    /// Type of the affected entity (e.g. `"document"`).
    pub entity_type: String,
    /// Affected entity ID.
    pub entity_id: Option<Uuid>,
    /// Additional details (JSON).
    pub details: Option<serde_json::Value>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to append an activity entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivity {
    /// Acting user.
    pub actor_id: Option<Uuid>,
    /// Related project.
    pub project_id: Option<Uuid>,
    /// Action name.
    pub action: String,
    /// Entity type.
    pub entity_type: String,
    /// Entity ID.
    pub entity_id: Option<Uuid>,
    /// Details.
    pub details: Option<serde_json::Value>,
}

impl NewActivity {
    /// Start an entry for `action` on an entity.
    pub fn new(
        actor_id: Uuid,
        action: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: Uuid,
    ) -> Self {
        Self {
            actor_id: Some(actor_id),
            project_id: None,
            action: action.into(),
            entity_type: entity_type.into(),
            entity_id: Some(entity_id),
            details: None,
        }
    }

    /// Attach the related project.
    pub fn in_project(mut self, project_id: Option<Uuid>) -> Self {
        self.project_id = project_id;
        self
    }

    /// Attach details.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Materialize the entry with a fresh id and timestamp.
    pub fn into_entry(self) -> ActivityLog {
        ActivityLog {
            id: Uuid::new_v4(),
            actor_id: self.actor_id,
            project_id: self.project_id,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            details: self.details,
            created_at: Utc::now(),
        }
    }
}

/// Filters for activity log queries. All set fields must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityFilter {
    /// Related project.
    pub project_id: Option<Uuid>,
    /// Entity type.
    pub entity_type: Option<String>,
    /// Entity ID.
    pub entity_id: Option<Uuid>,
    /// Acting user.
    pub actor_id: Option<Uuid>,
}

impl ActivityFilter {
    /// Whether `entry` satisfies every set filter.
    pub fn matches(&self, entry: &ActivityLog) -> bool {
        self.project_id.is_none_or(|p| entry.project_id == Some(p))
            && self
                .entity_type
                .as_deref()
                .is_none_or(|t| entry.entity_type == t)
            && self.entity_id.is_none_or(|e| entry.entity_id == Some(e))
            && self.actor_id.is_none_or(|a| entry.actor_id == Some(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_all_set_fields() {
        let actor = Uuid::new_v4();
        let project = Uuid::new_v4();
        let entry = NewActivity::new(actor, "task.create", "task", Uuid::new_v4())
            .in_project(Some(project))
            .into_entry();

        assert!(ActivityFilter::default().matches(&entry));
        let by_project = ActivityFilter {
            project_id: Some(project),
            entity_type: Some("task".into()),
            ..Default::default()
        };
        assert!(by_project.matches(&entry));
        let other_type = ActivityFilter {
            entity_type: Some("document".into()),
            ..Default::default()
        };
        assert!(!other_type.matches(&entry));
    }
}
