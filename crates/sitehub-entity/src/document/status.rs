//! ISO 19650 document status stages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of a document.
///
/// There is no enforced transition graph: any status may be set to any
/// other through an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_status")]
pub enum DocumentStatus {
    /// Work in progress, visible to the authoring team.
    #[default]
    #[serde(rename = "WIP", alias = "wip")]
    #[sqlx(rename = "WIP")]
    Wip,
    /// Shared for coordination.
    #[serde(alias = "shared")]
    Shared,
    /// Published (approved for use).
    #[serde(alias = "published")]
    Published,
    /// Archived record.
    #[serde(alias = "archived")]
    Archived,
}

impl DocumentStatus {
    /// All statuses in conventional lifecycle order.
    pub const ALL: [DocumentStatus; 4] = [Self::Wip, Self::Shared, Self::Published, Self::Archived];

    /// Return the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wip => "WIP",
            Self::Shared => "Shared",
            Self::Published => "Published",
            Self::Archived => "Archived",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = sitehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wip" => Ok(Self::Wip),
            "shared" => Ok(Self::Shared),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(sitehub_core::AppError::validation(format!(
                "Invalid document status: '{s}'. Expected one of: WIP, Shared, Published, Archived"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&DocumentStatus::Wip).unwrap(), "\"WIP\"");
        assert_eq!(
            serde_json::from_str::<DocumentStatus>("\"published\"").unwrap(),
            DocumentStatus::Published
        );
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Shared".parse::<DocumentStatus>().unwrap(), DocumentStatus::Shared);
        assert_eq!("wip".parse::<DocumentStatus>().unwrap(), DocumentStatus::Wip);
        assert!("draft".parse::<DocumentStatus>().is_err());
    }
}
