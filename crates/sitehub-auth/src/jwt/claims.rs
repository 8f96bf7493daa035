//! Access-token payload.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sitehub_entity::user::UserRole;

/// What a SiteHub access token asserts about its bearer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: Uuid,
    /// Role when the token was issued. Role changes apply at next login.
    pub role: UserRole,
    pub username: String,
    /// Issued at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
    /// Token ID.
    pub jti: Uuid,
}

impl Claims {
    /// Claims for `user_id` valid for `ttl` from `issued_at`.
    pub fn for_user(
        user_id: Uuid,
        role: UserRole,
        username: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: user_id,
            role,
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Expiry as a timestamp; the epoch if `exp` is out of range.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user_sets_window() {
        let now = Utc::now();
        let claims = Claims::for_user(
            Uuid::new_v4(),
            UserRole::Viewer,
            "inspector",
            now,
            Duration::minutes(60),
        );
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.expires_at().timestamp(), claims.exp);
    }
}
