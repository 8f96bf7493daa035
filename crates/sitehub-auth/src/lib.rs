//! # sitehub-auth
//!
//! Authentication and authorization for the SiteHub CDE.
//!
//! ## Modules
//!
//! - `jwt`: stateless access token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `rbac`: role-to-permission policies and enforcement

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{RbacEnforcer, RbacPolicies, SystemPermission};
