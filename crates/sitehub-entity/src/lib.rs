//! # sitehub-entity
//!
//! Domain entity models for SiteHub. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`; enumerations map to PostgreSQL enum types.

pub mod activity;
pub mod calendar;
pub mod comment;
pub mod document;
pub mod issue;
pub mod priority;
pub mod project;
pub mod task;
pub mod user;

pub use priority::Priority;
