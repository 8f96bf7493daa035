//! Document certifications (sign-offs recorded against a document).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A certification issued for a document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Certification {
    /// Unique certification identifier.
    pub id: Uuid,
    /// Certified document.
    pub document_id: Uuid,
    /// Kind of certification (e.g. "structural", "fire-safety").
    pub certification_type: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Certifying user.
    pub certified_by: Uuid,
    /// When the certification was recorded.
    pub certified_at: DateTime<Utc>,
}

/// Data required to record a certification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCertification {
    /// Certified document.
    pub document_id: Uuid,
    /// Kind of certification.
    pub certification_type: String,
    /// Notes.
    pub notes: Option<String>,
    /// Certifying user.
    pub certified_by: Uuid,
}
