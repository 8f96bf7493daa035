//! # sitehub-service
//!
//! Business logic for the SiteHub CDE. Each service checks the caller's
//! role, delegates persistence to repositories or stores, appends an
//! activity log entry for every mutation and publishes realtime events.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod activity;
pub mod calendar;
pub mod comment;
pub mod context;
pub mod document;
pub mod issue;
mod notify;
pub mod project;
pub mod task;
pub mod user;

pub use activity::{ActivityRecorder, ActivityService};
pub use calendar::CalendarService;
pub use comment::CommentService;
pub use context::RequestContext;
pub use document::{DocumentService, DocumentView};
pub use issue::IssueService;
pub use project::ProjectService;
pub use task::TaskService;
pub use user::{AdminUserService, AuthService};
