//! Append-only document history rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use super::model::Document;
use super::status::DocumentStatus;

/// The mutation that produced a history row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "history_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    /// The document was created.
    Upload,
    /// The document was changed.
    Update,
    /// The document was deleted.
    Delete,
    /// The document was restored to an earlier snapshot.
    Restore,
}

impl HistoryAction {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of a document's fields at the moment of a mutation.
///
/// Rows are never updated or deleted, and outlive the live document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentHistory {
    /// Unique history row identifier.
    pub id: Uuid,
    /// The document this row describes.
    pub document_id: Uuid,
    /// Captured name.
    pub name: String,
    /// Captured URL.
    pub url: String,
    /// Captured version.
    pub version: i32,
    /// Captured status.
    pub status: DocumentStatus,
    /// What happened.
    pub action: HistoryAction,
    /// Who did it.
    pub actor_id: Option<Uuid>,
    /// When it happened.
    pub created_at: DateTime<Utc>,
}

impl DocumentHistory {
    /// Build a history row capturing `document` as it is now.
    pub fn snapshot(document: &Document, action: HistoryAction, actor_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id: document.id,
            name: document.name.clone(),
            url: document.url.clone(),
            version: document.version,
            status: document.status,
            action,
            actor_id,
            created_at: Utc::now(),
        }
    }
}
