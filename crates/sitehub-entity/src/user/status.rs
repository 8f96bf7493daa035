//! Whether an account may sign in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sitehub_core::AppError;

/// Account state. Inactive accounts keep their data but cannot log in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn can_login(self) -> bool {
        self == Self::Active
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        })
    }
}

impl FromStr for UserStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" | "enabled" => Ok(Self::Active),
            "inactive" | "disabled" => Ok(Self::Inactive),
            _ => Err(AppError::validation(format!(
                "Unknown user status '{s}'; expected active or inactive"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_logs_in() {
        assert!(UserStatus::Active.can_login());
        assert!(!UserStatus::Inactive.can_login());
        assert_eq!("disabled".parse::<UserStatus>().unwrap(), UserStatus::Inactive);
    }
}
