//! Site roles, least to most privileged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sitehub_core::AppError;

/// A user's role on the CDE.
///
/// Variants are declared from least to most privileged so the derived
/// ordering doubles as the role hierarchy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Reads everything, may comment.
    Viewer,
    /// Creates and edits documents, tasks, issues and events.
    Contributor,
    /// Approves, certifies, restores and deletes; manages projects.
    Manager,
    /// Everything, including user administration.
    Admin,
}

impl UserRole {
    /// All roles, most privileged first.
    pub const ALL: [UserRole; 4] = [Self::Admin, Self::Manager, Self::Contributor, Self::Viewer];

    /// Whether this role sits at or above `other` in the hierarchy.
    pub fn has_at_least(self, other: UserRole) -> bool {
        self >= other
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Contributor => "contributor",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Unknown role '{s}'; expected admin, manager, contributor or viewer"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_follows_declaration_order() {
        assert!(UserRole::Admin > UserRole::Manager);
        assert!(UserRole::Manager.has_at_least(UserRole::Contributor));
        assert!(UserRole::Viewer.has_at_least(UserRole::Viewer));
        assert!(!UserRole::Contributor.has_at_least(UserRole::Manager));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Manager ".parse::<UserRole>().unwrap(), UserRole::Manager);
        assert_eq!("VIEWER".parse::<UserRole>().unwrap(), UserRole::Viewer);
        assert!("creator".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_all_is_most_privileged_first() {
        let mut sorted = UserRole::ALL;
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(sorted, UserRole::ALL);
    }
}
