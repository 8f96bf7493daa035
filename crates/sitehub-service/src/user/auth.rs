//! Credential login, self-registration and the current-user lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use sitehub_auth::{JwtEncoder, PasswordHasher, PasswordValidator};
use sitehub_core::error::AppError;
use sitehub_database::repositories::UserRepository;
use sitehub_entity::activity::NewActivity;
use sitehub_entity::user::{CreateUser, User, UserRole};

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
}

/// Self-registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Username.
    pub username: String,
    /// Email.
    pub email: Option<String>,
    /// Password.
    pub password: String,
    /// Display name.
    pub display_name: Option<String>,
}

/// Handles authentication flows.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
    /// Activity log.
    activity: ActivityRecorder,
    /// Whether anonymous registration is open.
    allow_registration: bool,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        activity: ActivityRecorder,
        allow_registration: bool,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
            activity,
            allow_registration,
        }
    }

    /// Verifies credentials and issues an access token.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let invalid = || AppError::authentication("Invalid username or password");

        let user = self
            .user_repo
            .find_by_username(username.trim())
            .await?
            .ok_or_else(invalid)?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(username = %user.username, "Failed login attempt");
            return Err(invalid());
        }
        if !user.can_login() {
            warn!(user_id = %user.id, "Login attempt for inactive account");
            return Err(AppError::authentication("Account is disabled"));
        }

        let token = self
            .encoder
            .generate_access_token(user.id, user.role, &user.username)?;
        self.user_repo.update_last_login(user.id).await?;

        info!(user_id = %user.id, username = %user.username, "User logged in");
        self.activity
            .record(NewActivity::new(user.id, "user.login", "user", user.id))
            .await;

        Ok(LoginResponse {
            access_token: token.token,
            token_type: "Bearer".to_string(),
            expires_at: token.expires_at,
            user,
        })
    }

    /// Creates a viewer account when registration is enabled.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        if !self.allow_registration {
            return Err(AppError::authorization("Registration is disabled"));
        }
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
                role: UserRole::Viewer,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        self.activity
            .record(NewActivity::new(user.id, "user.register", "user", user.id))
            .await;
        Ok(user)
    }

    /// Returns the caller's own account.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
