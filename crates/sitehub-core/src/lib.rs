//! # sitehub-core
//!
//! Core crate for SiteHub. Contains configuration schemas, the unified
//! error system, pagination types, domain events, and the traits that
//! other crates implement (storage, event publishing).
//!
//! This crate has **no** internal dependencies on other SiteHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
