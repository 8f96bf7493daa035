//! Admin user management: CRUD, role and status changes, role listing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sitehub_auth::{PasswordHasher, PasswordValidator, RbacEnforcer, SystemPermission};
use sitehub_core::error::AppError;
use sitehub_core::types::{PageRequest, PageResponse};
use sitehub_database::repositories::UserRepository;
use sitehub_entity::activity::NewActivity;
use sitehub_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;

/// Request to create a user with a chosen role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Username (unique, case-insensitive).
    pub username: String,
    /// Email (unique, optional).
    pub email: Option<String>,
    /// Initial password.
    pub password: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Role assignment.
    pub role: UserRole,
}

/// A role and the permissions it carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePermissions {
    /// The role.
    pub role: UserRole,
    /// Granted permissions, sorted.
    pub permissions: Vec<SystemPermission>,
}

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
    /// Activity log.
    activity: ActivityRecorder,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        rbac: Arc<RbacEnforcer>,
        activity: ActivityRecorder,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            rbac,
            activity,
        }
    }

    /// Lists users, optionally by role or search term.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        role: Option<UserRole>,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::UserManage)?;
        self.user_repo.find_all(role, search, &page).await
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::UserManage)?;
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates a new user.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::UserManage)?;

        let username = req.username.trim().to_string();
        if username.len() < 3 {
            return Err(AppError::validation(
                "Username must be at least 3 characters",
            ));
        }
        self.validator.validate(&req.password)?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                username,
                email: req.email,
                password_hash,
                display_name: req.display_name,
                role: req.role,
            })
            .await?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %user.id,
            role = %user.role,
            "User created by admin"
        );
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "user.create", "user", user.id)
                    .with_details(serde_json::json!({ "role": user.role })),
            )
            .await;
        Ok(user)
    }

    /// Updates profile fields, role or status.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        changes: UpdateUser,
    ) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::UserManage)?;
        if ctx.is(user_id) && (changes.role.is_some() || changes.status.is_some()) {
            return Err(AppError::validation(
                "Cannot change your own role or status",
            ));
        }

        let user = self.user_repo.update(user_id, &changes).await?;
        info!(admin_id = %ctx.user_id, user_id = %user_id, "User updated by admin");
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "user.update", "user", user_id).with_details(
                    serde_json::json!({ "role": changes.role, "status": changes.status }),
                ),
            )
            .await;
        Ok(user)
    }

    /// Deletes a user. Deleting oneself is rejected.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::UserManage)?;
        if ctx.is(user_id) {
            return Err(AppError::validation("Cannot delete your own account"));
        }

        if !self.user_repo.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(admin_id = %ctx.user_id, user_id = %user_id, "User deleted by admin");
        self.activity
            .record(NewActivity::new(ctx.user_id, "user.delete", "user", user_id))
            .await;
        Ok(())
    }

    /// Every role with its permissions, highest privilege first.
    pub fn roles(&self, ctx: &RequestContext) -> Result<Vec<RolePermissions>, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        Ok(role_table(&self.rbac))
    }
}

fn role_table(rbac: &RbacEnforcer) -> Vec<RolePermissions> {
    UserRole::ALL
        .iter()
        .map(|role| RolePermissions {
            role: *role,
            permissions: rbac.policies().permissions_for(role),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_table_is_cumulative() {
        let table = role_table(&RbacEnforcer::new());
        assert_eq!(table.len(), 4);
        let count = |role: UserRole| {
            table
                .iter()
                .find(|r| r.role == role)
                .map(|r| r.permissions.len())
                .unwrap()
        };
        assert!(count(UserRole::Admin) > count(UserRole::Manager));
        assert!(count(UserRole::Manager) > count(UserRole::Contributor));
        assert!(count(UserRole::Contributor) > count(UserRole::Viewer));
    }
}
