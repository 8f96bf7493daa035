//! Document response shape.

use serde::{Deserialize, Serialize};

use sitehub_entity::document::Document;

/// A document plus derived, read-only fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentView {
    /// The live record.
    #[serde(flatten)]
    pub document: Document,
    /// ISO 19650 container name, when the metadata carries every field.
    pub container_name: Option<String>,
}

impl DocumentView {
    /// Build the view, resolving the container name with the project code.
    pub fn new(document: Document, project_code: Option<&str>) -> Self {
        let container_name = document.container_name(project_code);
        Self {
            document,
            container_name,
        }
    }
}
