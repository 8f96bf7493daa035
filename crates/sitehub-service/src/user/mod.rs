//! Login, registration and administrative user management.

pub mod admin;
pub mod auth;

pub use admin::{AdminUserService, CreateUserRequest, RolePermissions};
pub use auth::{AuthService, LoginResponse, RegisterRequest};
