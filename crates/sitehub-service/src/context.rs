//! The caller of a service operation.

use uuid::Uuid;

use sitehub_entity::user::UserRole;

/// Identity of the authenticated caller, taken from the access token.
///
/// Every service method receives one so permission checks and activity
/// records know who is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// The caller's user ID.
    pub user_id: Uuid,
    /// The caller's username.
    pub username: String,
    /// The caller's role when the token was issued.
    pub role: UserRole,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, username: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    /// Whether `user_id` is the caller.
    pub fn is(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}
