//! Core type definitions used across the SiteHub workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
