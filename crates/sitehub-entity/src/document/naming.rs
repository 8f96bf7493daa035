//! ISO 19650 container naming.
//!
//! A container name is seven hyphen-separated fields:
//! `PROJECT-ORIGINATOR-VOLUME-LEVEL-TYPE-ROLE-NUMBER`, for example
//! `TWR1-ARC-ZZ-02-DR-A-0001`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A parsed ISO 19650 container name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iso19650Name {
    /// Project code.
    pub project: String,
    /// Originating organisation.
    pub originator: String,
    /// Volume or system.
    pub volume: String,
    /// Level or location.
    pub level: String,
    /// Information type (DR, M3, SP, ...).
    pub doc_type: String,
    /// Discipline role (A, S, M, ...).
    pub role: String,
    /// Sequential number.
    pub number: String,
}

impl Iso19650Name {
    /// Build a name from a document metadata object.
    ///
    /// `project_code` is used when metadata has no `project` field. Returns
    /// `None` if any field is missing or not a valid code.
    pub fn from_metadata(metadata: &serde_json::Value, project_code: Option<&str>) -> Option<Self> {
        let field = |key: &str| -> Option<String> {
            metadata
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_uppercase())
                .filter(|s| is_code(s))
        };

        let project = field("project")
            .or_else(|| project_code.map(|c| c.trim().to_uppercase()))
            .filter(|s| is_code(s))?;

        Some(Self {
            project,
            originator: field("originator")?,
            volume: field("volume")?,
            level: field("level")?,
            doc_type: field("type")?,
            role: field("role")?,
            number: field("number")?,
        })
    }
}

fn is_code(s: &str) -> bool {
    !s.is_empty() && s.len() <= 12 && s.chars().all(|c| c.is_ascii_alphanumeric())
}

impl fmt::Display for Iso19650Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}-{}-{}-{}",
            self.project,
            self.originator,
            self.volume,
            self.level,
            self.doc_type,
            self.role,
            self.number
        )
    }
}

impl FromStr for Iso19650Name {
    type Err = sitehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<String> = s.split('-').map(|p| p.trim().to_uppercase()).collect();
        if parts.len() != 7 || !parts.iter().all(|p| is_code(p)) {
            return Err(sitehub_core::AppError::validation(format!(
                "Invalid ISO 19650 name: '{s}'. Expected PROJECT-ORIGINATOR-VOLUME-LEVEL-TYPE-ROLE-NUMBER"
            )));
        }
        let mut it = parts.into_iter();
        let mut next = || it.next().unwrap_or_default();
        Ok(Self {
            project: next(),
            originator: next(),
            volume: next(),
            level: next(),
            doc_type: next(),
            role: next(),
            number: next(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_metadata_uses_project_code_fallback() {
        let meta = json!({
            "originator": "arc", "volume": "ZZ", "level": "02",
            "type": "DR", "role": "A", "number": "0001"
        });
        let name = Iso19650Name::from_metadata(&meta, Some("twr1")).expect("complete");
        assert_eq!(name.to_string(), "TWR1-ARC-ZZ-02-DR-A-0001");
    }

    #[test]
    fn test_from_metadata_incomplete_is_none() {
        let meta = json!({ "originator": "ARC", "volume": "ZZ" });
        assert!(Iso19650Name::from_metadata(&meta, Some("TWR1")).is_none());
    }

    #[test]
    fn test_parse() {
        let name: Iso19650Name = "twr1-str-b1-00-m3-s-0042".parse().expect("parse");
        assert_eq!(name.role, "S");
        assert_eq!(name.number, "0042");
        assert!("TWR1-ARC-ZZ".parse::<Iso19650Name>().is_err());
        assert!("TWR1-ARC-ZZ-02-DR-A-00/1".parse::<Iso19650Name>().is_err());
    }
}
