//! Multipart upload payloads.

use bytes::Bytes;
use uuid::Uuid;

use sitehub_entity::document::DocumentStatus;

/// A received file.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Client-supplied file name.
    pub file_name: String,
    /// File contents.
    pub data: Bytes,
}

/// Fields accompanying an upload that creates a new document.
#[derive(Debug, Clone)]
pub struct UploadDocumentRequest {
    /// The file.
    pub file: FilePart,
    /// Display name; defaults to the file name.
    pub name: Option<String>,
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Initial status; defaults to WIP.
    pub status: Option<DocumentStatus>,
    /// Free-text category.
    pub category: Option<String>,
    /// Metadata bag.
    pub metadata: Option<serde_json::Value>,
}
