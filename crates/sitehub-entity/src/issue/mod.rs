//! Issue entities.

pub mod model;

pub use model::{CreateIssue, Issue, IssueStatus, UpdateIssue, next_resolved_at};
