//! Issue entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use crate::priority::Priority;

/// Resolution state of an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "issue_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Newly raised.
    #[default]
    Open,
    /// Being addressed.
    InProgress,
    /// Fixed, awaiting close-out.
    Resolved,
    /// Closed.
    Closed,
}

impl IssueStatus {
    /// Whether the issue is resolved or closed.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A defect, RFI or clash raised against a project or document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Issue {
    /// Unique issue identifier.
    pub id: Uuid,
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Related document.
    pub document_id: Option<Uuid>,
    /// Short title.
    pub title: String,
    /// Details.
    pub description: Option<String>,
    /// Resolution state.
    pub status: IssueStatus,
    /// Priority.
    pub priority: Priority,
    /// Raising user.
    pub reporter_id: Uuid,
    /// Assigned user.
    pub assignee_id: Option<Uuid>,
    /// When the issue entered `resolved` or `closed`.
    pub resolved_at: Option<DateTime<Utc>>,
    /// When the issue was raised.
    pub created_at: DateTime<Utc>,
    /// When the issue was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to raise an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIssue {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Related document.
    pub document_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Priority.
    pub priority: Priority,
    /// Raising user.
    pub reporter_id: Uuid,
    /// Assignee.
    pub assignee_id: Option<Uuid>,
}

/// Partial update of an issue. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIssue {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New status.
    pub status: Option<IssueStatus>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New assignee.
    pub assignee_id: Option<Uuid>,
}

/// Compute the `resolved_at` stamp after a status change.
///
/// Entering a settled state stamps `now` (keeping an existing stamp);
/// reopening clears it.
pub fn next_resolved_at(
    current: Option<DateTime<Utc>>,
    new_status: IssueStatus,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if new_status.is_settled() {
        current.or(Some(now))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolving_stamps_once() {
        let now = Utc::now();
        let stamped = next_resolved_at(None, IssueStatus::Resolved, now);
        assert_eq!(stamped, Some(now));
        let later = now + chrono::Duration::hours(1);
        assert_eq!(next_resolved_at(stamped, IssueStatus::Closed, later), Some(now));
    }

    #[test]
    fn test_reopening_clears_stamp() {
        let now = Utc::now();
        assert_eq!(next_resolved_at(Some(now), IssueStatus::Open, now), None);
    }
}
