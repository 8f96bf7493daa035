//! Live document record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::history::DocumentHistory;
use super::naming::Iso19650Name;
use super::status::DocumentStatus;

/// The canonical current state of a document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Owning project (optional).
    pub project_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Storage URL.
    pub url: String,
    /// Revision number. Conventionally non-decreasing, not enforced.
    pub version: i32,
    /// Lifecycle stage.
    pub status: DocumentStatus,
    /// Free-text category (e.g. "Drawing", "Specification").
    pub category: Option<String>,
    /// Uploading user.
    pub uploaded_by: Option<Uuid>,
    /// Opaque metadata bag (ISO 19650 fields live here).
    pub metadata: serde_json::Value,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// ISO 19650 container name derived from metadata, if complete.
    pub fn container_name(&self, project_code: Option<&str>) -> Option<String> {
        Iso19650Name::from_metadata(&self.metadata, project_code).map(|n| n.to_string())
    }

    /// Copy name, URL and version back from a history snapshot.
    pub fn restore_from(&mut self, entry: &DocumentHistory) {
        self.name = entry.name.clone();
        self.url = entry.url.clone();
        self.version = entry.version;
        self.updated_at = Utc::now();
    }
}

/// Data required to create a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Storage URL.
    pub url: String,
    /// Initial version.
    pub version: i32,
    /// Initial status.
    pub status: DocumentStatus,
    /// Category.
    pub category: Option<String>,
    /// Uploading user.
    pub uploaded_by: Option<Uuid>,
    /// Metadata bag.
    pub metadata: serde_json::Value,
}

impl NewDocument {
    /// Materialize the record with a fresh id and timestamps.
    pub fn into_document(self) -> Document {
        let now = Utc::now();
        Document {
            id: Uuid::new_v4(),
            project_id: self.project_id,
            name: self.name,
            url: self.url,
            version: self.version,
            status: self.status,
            category: self.category,
            uploaded_by: self.uploaded_by,
            metadata: self.metadata,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a document. `None` leaves a field unchanged.
///
/// Any caller-supplied version is accepted, including one lower than the
/// current version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentChanges {
    /// New name.
    pub name: Option<String>,
    /// New URL.
    pub url: Option<String>,
    /// New version.
    pub version: Option<i32>,
    /// New status.
    pub status: Option<DocumentStatus>,
    /// New category.
    pub category: Option<String>,
    /// Replacement metadata bag.
    pub metadata: Option<serde_json::Value>,
}

impl DocumentChanges {
    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.url.is_none()
            && self.version.is_none()
            && self.status.is_none()
            && self.category.is_none()
            && self.metadata.is_none()
    }

    /// Apply the set fields onto `document`.
    pub fn apply_to(&self, document: &mut Document) {
        if let Some(name) = &self.name {
            document.name = name.clone();
        }
        if let Some(url) = &self.url {
            document.url = url.clone();
        }
        if let Some(version) = self.version {
            document.version = version;
        }
        if let Some(status) = self.status {
            document.status = status;
        }
        if let Some(category) = &self.category {
            document.category = Some(category.clone());
        }
        if let Some(metadata) = &self.metadata {
            document.metadata = metadata.clone();
        }
        document.updated_at = Utc::now();
    }
}
