//! RBAC enforcement logic: checks whether a role has a required permission.

use sitehub_core::error::AppError;
use sitehub_entity::user::UserRole;

use super::policies::{RbacPolicies, SystemPermission};

/// Enforces role-based access control for system-level operations.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Returns `Authorization` error unless `role` holds `permission`.
    pub fn require_permission(
        &self,
        role: &UserRole,
        permission: SystemPermission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(role, &permission) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Checks whether the role has the required permission.
    pub fn has_permission(&self, role: &UserRole, permission: SystemPermission) -> bool {
        self.policies.has_permission(role, &permission)
    }

    /// Returns a reference to the underlying policies.
    pub fn policies(&self) -> &RbacPolicies {
        &self.policies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitehub_core::error::ErrorKind;

    #[test]
    fn test_denial_is_authorization_error() {
        let err = RbacEnforcer::new()
            .require_permission(&UserRole::Viewer, SystemPermission::DocumentDelete)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[test]
    fn test_manager_may_restore() {
        assert!(
            RbacEnforcer::new()
                .require_permission(&UserRole::Manager, SystemPermission::DocumentRestore)
                .is_ok()
        );
    }
}
