//! Password policy enforcement for new passwords.

use sitehub_core::config::AuthConfig;
use sitehub_core::error::AppError;

/// Validates new passwords: minimum length, a letter and a digit.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Returns the first policy violation, if any.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_alphabetic()) {
            return Err(AppError::validation(
                "Password must contain at least one letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_accepts_policy_compliant_password() {
        assert!(validator().validate("rebar2024").is_ok());
    }

    #[test]
    fn test_rejects_short_password() {
        assert!(validator().validate("ab1").is_err());
    }

    #[test]
    fn test_requires_letter_and_digit() {
        assert!(validator().validate("1234567890").is_err());
        assert!(validator().validate("abcdefghij").is_err());
    }
}
