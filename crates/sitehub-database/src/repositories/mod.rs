//! Repository implementations for all SiteHub entities.

pub mod activity;
pub mod calendar;
pub mod comment;
pub mod document;
pub mod issue;
pub mod project;
pub mod task;
pub mod user;

pub use activity::ActivityLogRepository;
pub use calendar::CalendarRepository;
pub use comment::CommentRepository;
pub use document::DocumentRepository;
pub use issue::IssueRepository;
pub use project::ProjectRepository;
pub use task::TaskRepository;
pub use user::UserRepository;
