//! Comment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Kind of entity a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "comment_target", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommentTarget {
    /// A document.
    Document,
    /// A task.
    Task,
    /// An issue.
    Issue,
}

impl CommentTarget {
    /// Return the target type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Task => "task",
            Self::Issue => "issue",
        }
    }
}

impl fmt::Display for CommentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A comment on a document, task or issue.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// Target kind.
    pub target_type: CommentTarget,
    /// Target identifier.
    pub target_id: Uuid,
    /// Writing user.
    pub author_id: Uuid,
    /// Text.
    pub body: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
}

/// Data required to post a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    /// Target kind.
    pub target_type: CommentTarget,
    /// Target identifier.
    pub target_id: Uuid,
    /// Writing user.
    pub author_id: Uuid,
    /// Text.
    pub body: String,
}
