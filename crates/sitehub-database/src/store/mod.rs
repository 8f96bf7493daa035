//! Storage traits for documents, work items, comments and the activity log.
//!
//! Every document mutation performs exactly one live-row write and exactly
//! one history append. The PostgreSQL implementations wrap the pair in a
//! transaction; the in-memory implementations hold a single lock across it.

pub mod memory;
pub mod memory_items;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use sitehub_core::result::AppResult;
use sitehub_core::types::{PageRequest, PageResponse};
use sitehub_entity::activity::{ActivityFilter, ActivityLog, NewActivity};
use sitehub_entity::calendar::{CalendarEvent, CreateCalendarEvent};
use sitehub_entity::comment::{Comment, CommentTarget, CreateComment};
use sitehub_entity::document::{
    Certification, Document, DocumentChanges, DocumentHistory, DocumentStatus, NewCertification,
    NewDocument,
};
use sitehub_entity::issue::{CreateIssue, Issue, IssueStatus, UpdateIssue};
use sitehub_entity::task::{CreateTask, Task, TaskStatus, UpdateTask};

pub use memory::{MemoryActivityStore, MemoryDocumentStore};
pub use memory_items::{MemoryCalendarStore, MemoryCommentStore, MemoryIssueStore, MemoryTaskStore};

/// Filters for document listings. All set fields must match.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Lifecycle stage.
    pub status: Option<DocumentStatus>,
    /// Category (exact, case-insensitive).
    pub category: Option<String>,
    /// Substring of the name (case-insensitive).
    pub search: Option<String>,
}

impl DocumentFilter {
    /// Whether `doc` satisfies every set filter.
    pub fn matches(&self, doc: &Document) -> bool {
        self.project_id.is_none_or(|p| doc.project_id == Some(p))
            && self.status.is_none_or(|s| doc.status == s)
            && self.category.as_deref().is_none_or(|c| {
                doc.category
                    .as_deref()
                    .is_some_and(|dc| dc.eq_ignore_ascii_case(c))
            })
            && self.search.as_deref().is_none_or(|q| {
                doc.name.to_lowercase().contains(&q.to_lowercase())
            })
    }
}

/// A live-row write paired with the history row it produced.
#[derive(Debug, Clone)]
pub struct Recorded {
    /// The document after the mutation.
    pub document: Document,
    /// The history row appended by the mutation.
    pub history: DocumentHistory,
}

/// Persistence for documents, their history and certifications.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// List documents matching `filter`, most recently updated first.
    async fn list(
        &self,
        filter: &DocumentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>>;

    /// Fetch a live document.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>>;

    /// Insert a document and append an `upload` history row.
    async fn create(&self, data: NewDocument, actor_id: Option<Uuid>) -> AppResult<Recorded>;

    /// Apply `changes` and append an `update` history row capturing the
    /// new state. Fails with `NotFound` if the document does not exist.
    async fn update(
        &self,
        id: Uuid,
        changes: &DocumentChanges,
        actor_id: Option<Uuid>,
    ) -> AppResult<Recorded>;

    /// Append a `delete` history row capturing the last state, then remove
    /// the live row. Returns the history row.
    async fn delete(&self, id: Uuid, actor_id: Option<Uuid>) -> AppResult<DocumentHistory>;

    /// Copy name, URL and version from history entry `history_id` onto the
    /// live row and append a `restore` history row. Fails with `NotFound`
    /// if the entry or the live document is missing.
    async fn restore(&self, history_id: Uuid, actor_id: Option<Uuid>) -> AppResult<Recorded>;

    /// History rows of a document, newest first. Works after deletion.
    async fn history(&self, document_id: Uuid) -> AppResult<Vec<DocumentHistory>>;

    /// Record a certification against a live document.
    async fn add_certification(&self, data: NewCertification) -> AppResult<Certification>;

    /// Certifications of a document, newest first.
    async fn certifications(&self, document_id: Uuid) -> AppResult<Vec<Certification>>;

    /// Count documents per status within a project.
    async fn count_by_status(&self, project_id: Uuid) -> AppResult<Vec<(DocumentStatus, i64)>>;

    /// Code of the project a document belongs to, for container naming.
    async fn project_code(&self, project_id: Uuid) -> AppResult<Option<String>>;
}

/// Append-only activity log persistence.
#[async_trait]
pub trait ActivityStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append an entry.
    async fn append(&self, data: NewActivity) -> AppResult<ActivityLog>;

    /// Search entries, newest first.
    async fn search(
        &self,
        filter: &ActivityFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityLog>>;
}

/// Filters for task listings.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Assigned user.
    pub assignee_id: Option<Uuid>,
    /// Progress.
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Whether `task` satisfies every set filter.
    pub fn matches(&self, task: &Task) -> bool {
        self.project_id.is_none_or(|p| task.project_id == Some(p))
            && self.assignee_id.is_none_or(|a| task.assignee_id == Some(a))
            && self.status.is_none_or(|s| task.status == s)
    }
}

/// Filters for issue listings.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Related document.
    pub document_id: Option<Uuid>,
    /// Resolution state.
    pub status: Option<IssueStatus>,
}

impl IssueFilter {
    /// Whether `issue` satisfies every set filter.
    pub fn matches(&self, issue: &Issue) -> bool {
        self.project_id.is_none_or(|p| issue.project_id == Some(p))
            && self.document_id.is_none_or(|d| issue.document_id == Some(d))
            && self.status.is_none_or(|s| issue.status == s)
    }
}

/// Task persistence.
#[async_trait]
pub trait TaskStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a task by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Task>>;

    /// List tasks by filter, soonest due first.
    async fn find_all(
        &self,
        filter: &TaskFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Task>>;

    /// Create a task.
    async fn create(&self, data: &CreateTask) -> AppResult<Task>;

    /// Apply a partial update. Fails with `NotFound` if the task is gone.
    async fn update(&self, id: Uuid, data: &UpdateTask) -> AppResult<Task>;

    /// Delete a task. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Issue persistence.
#[async_trait]
pub trait IssueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an issue by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Issue>>;

    /// List issues by filter, newest first.
    async fn find_all(
        &self,
        filter: &IssueFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Issue>>;

    /// Raise an issue.
    async fn create(&self, data: &CreateIssue) -> AppResult<Issue>;

    /// Apply a partial update. `resolved_at` is written as given.
    async fn update(
        &self,
        id: Uuid,
        data: &UpdateIssue,
        resolved_at: Option<DateTime<Utc>>,
    ) -> AppResult<Issue>;

    /// Delete an issue. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Calendar event persistence.
#[async_trait]
pub trait CalendarStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an event by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CalendarEvent>>;

    /// Events overlapping `[from, to)`, optionally within one project,
    /// earliest first.
    async fn find_in_window(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        project_id: Option<Uuid>,
    ) -> AppResult<Vec<CalendarEvent>>;

    /// Schedule an event.
    async fn create(&self, data: &CreateCalendarEvent) -> AppResult<CalendarEvent>;

    /// Overwrite an event with already-merged values.
    async fn save(&self, event: &CalendarEvent) -> AppResult<CalendarEvent>;

    /// Delete an event. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Comment persistence.
#[async_trait]
pub trait CommentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a comment by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>>;

    /// Comments on one target, oldest first.
    async fn find_for_target(
        &self,
        target_type: CommentTarget,
        target_id: Uuid,
    ) -> AppResult<Vec<Comment>>;

    /// Post a comment.
    async fn create(&self, data: &CreateComment) -> AppResult<Comment>;

    /// Delete a comment. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
