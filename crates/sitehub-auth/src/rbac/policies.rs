//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use sitehub_entity::user::UserRole;

/// A system-level permission checked per route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemPermission {
    // Read access
    /// Read projects, documents, tasks, issues, events and comments.
    ContentRead,

    // Comments
    /// Post comments.
    CommentCreate,
    /// Delete other users' comments.
    CommentModerate,

    // Documents
    /// Create, upload and update documents, upload revisions.
    DocumentWrite,
    /// Delete documents.
    DocumentDelete,
    /// Approve documents (set Published).
    DocumentApprove,
    /// Record certifications.
    DocumentCertify,
    /// Restore documents to a history snapshot.
    DocumentRestore,

    // Work items
    /// Create and update tasks, issues and calendar events.
    WorkItemWrite,
    /// Delete tasks, issues and calendar events.
    WorkItemDelete,

    // Projects
    /// Create, update and delete projects.
    ProjectManage,

    // Audit
    /// Read the activity log.
    ActivityView,

    // Administration
    /// Create, update and delete users.
    UserManage,
}

/// Defines the mapping from each role to its set of allowed permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    policies: HashMap<UserRole, HashSet<SystemPermission>>,
}

impl RbacPolicies {
    /// Creates the default policy set. Each role inherits the one below it.
    pub fn new() -> Self {
        use SystemPermission::*;

        let viewer: HashSet<SystemPermission> = [ContentRead, CommentCreate].into_iter().collect();

        let mut contributor = viewer.clone();
        contributor.extend([DocumentWrite, WorkItemWrite]);

        let mut manager = contributor.clone();
        manager.extend([
            CommentModerate,
            DocumentDelete,
            DocumentApprove,
            DocumentCertify,
            DocumentRestore,
            WorkItemDelete,
            ProjectManage,
            ActivityView,
        ]);

        let mut admin = manager.clone();
        admin.insert(UserManage);

        let mut policies = HashMap::new();
        policies.insert(UserRole::Viewer, viewer);
        policies.insert(UserRole::Contributor, contributor);
        policies.insert(UserRole::Manager, manager);
        policies.insert(UserRole::Admin, admin);
        Self { policies }
    }

    /// Checks whether a role has a specific permission.
    pub fn has_permission(&self, role: &UserRole, permission: &SystemPermission) -> bool {
        self.policies
            .get(role)
            .is_some_and(|perms| perms.contains(permission))
    }

    /// Permissions granted to a role, sorted for stable output.
    pub fn permissions_for(&self, role: &UserRole) -> Vec<SystemPermission> {
        let mut perms: Vec<SystemPermission> = self
            .policies
            .get(role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        perms.sort();
        perms
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
