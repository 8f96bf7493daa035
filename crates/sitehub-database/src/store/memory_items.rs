//! In-memory stores for tasks, issues, calendar events and comments.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use sitehub_core::error::AppError;
use sitehub_core::result::AppResult;
use sitehub_core::types::{PageRequest, PageResponse};
use sitehub_entity::calendar::{CalendarEvent, CreateCalendarEvent};
use sitehub_entity::comment::{Comment, CommentTarget, CreateComment};
use sitehub_entity::issue::{CreateIssue, Issue, IssueStatus, UpdateIssue};
use sitehub_entity::task::{CreateTask, Task, UpdateTask};

use super::memory::paginate;
use super::{CalendarStore, CommentStore, IssueFilter, IssueStore, TaskFilter, TaskStore};

/// Task store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryTaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Task>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn find_all(
        &self,
        filter: &TaskFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Task>> {
        let tasks = self.tasks.read().await;
        let mut matching: Vec<Task> = tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        matching.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y).then(b.created_at.cmp(&a.created_at)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.created_at.cmp(&a.created_at),
        });
        Ok(paginate(&matching, page))
    }

    async fn create(&self, data: &CreateTask) -> AppResult<Task> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            project_id: data.project_id,
            title: data.title.clone(),
            description: data.description.clone(),
            status: data.status,
            priority: data.priority,
            assignee_id: data.assignee_id,
            due_date: data.due_date,
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
        };
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: Uuid, data: &UpdateTask) -> AppResult<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Task {id} not found")))?;
        if let Some(title) = &data.title {
            task.title = title.clone();
        }
        if data.description.is_some() {
            task.description = data.description.clone();
        }
        if let Some(status) = data.status {
            task.status = status;
        }
        if let Some(priority) = data.priority {
            task.priority = priority;
        }
        if data.assignee_id.is_some() {
            task.assignee_id = data.assignee_id;
        }
        if data.due_date.is_some() {
            task.due_date = data.due_date;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }
}

/// Issue store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryIssueStore {
    issues: RwLock<HashMap<Uuid, Issue>>,
}

impl MemoryIssueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IssueStore for MemoryIssueStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Issue>> {
        Ok(self.issues.read().await.get(&id).cloned())
    }

    async fn find_all(
        &self,
        filter: &IssueFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Issue>> {
        let issues = self.issues.read().await;
        let mut matching: Vec<Issue> = issues
            .values()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&matching, page))
    }

    async fn create(&self, data: &CreateIssue) -> AppResult<Issue> {
        let now = Utc::now();
        let issue = Issue {
            id: Uuid::new_v4(),
            project_id: data.project_id,
            document_id: data.document_id,
            title: data.title.clone(),
            description: data.description.clone(),
            status: IssueStatus::default(),
            priority: data.priority,
            reporter_id: data.reporter_id,
            assignee_id: data.assignee_id,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        };
        self.issues.write().await.insert(issue.id, issue.clone());
        Ok(issue)
    }

    async fn update(
        &self,
        id: Uuid,
        data: &UpdateIssue,
        resolved_at: Option<DateTime<Utc>>,
    ) -> AppResult<Issue> {
        let mut issues = self.issues.write().await;
        let issue = issues
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Issue {id} not found")))?;
        if let Some(title) = &data.title {
            issue.title = title.clone();
        }
        if data.description.is_some() {
            issue.description = data.description.clone();
        }
        if let Some(status) = data.status {
            issue.status = status;
        }
        if let Some(priority) = data.priority {
            issue.priority = priority;
        }
        if data.assignee_id.is_some() {
            issue.assignee_id = data.assignee_id;
        }
        issue.resolved_at = resolved_at;
        issue.updated_at = Utc::now();
        Ok(issue.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.issues.write().await.remove(&id).is_some())
    }
}

/// Calendar store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryCalendarStore {
    events: RwLock<HashMap<Uuid, CalendarEvent>>,
}

impl MemoryCalendarStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CalendarStore for MemoryCalendarStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CalendarEvent>> {
        Ok(self.events.read().await.get(&id).cloned())
    }

    async fn find_in_window(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        project_id: Option<Uuid>,
    ) -> AppResult<Vec<CalendarEvent>> {
        let events = self.events.read().await;
        let mut matching: Vec<CalendarEvent> = events
            .values()
            .filter(|e| {
                from.is_none_or(|f| e.ends_at >= f)
                    && to.is_none_or(|t| e.starts_at < t)
                    && project_id.is_none_or(|p| e.project_id == Some(p))
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.starts_at.cmp(&b.starts_at));
        Ok(matching)
    }

    async fn create(&self, data: &CreateCalendarEvent) -> AppResult<CalendarEvent> {
        let now = Utc::now();
        let event = CalendarEvent {
            id: Uuid::new_v4(),
            project_id: data.project_id,
            title: data.title.clone(),
            description: data.description.clone(),
            location: data.location.clone(),
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            all_day: data.all_day,
            created_by: data.created_by,
            created_at: now,
            updated_at: now,
        };
        self.events.write().await.insert(event.id, event.clone());
        Ok(event)
    }

    async fn save(&self, event: &CalendarEvent) -> AppResult<CalendarEvent> {
        let mut events = self.events.write().await;
        let stored = events.get_mut(&event.id).ok_or_else(|| {
            AppError::not_found(format!("Calendar event {} not found", event.id))
        })?;
        *stored = CalendarEvent {
            updated_at: Utc::now(),
            ..event.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.events.write().await.remove(&id).is_some())
    }
}

/// Comment store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryCommentStore {
    comments: RwLock<Vec<Comment>>,
}

impl MemoryCommentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        Ok(self.comments.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn find_for_target(
        &self,
        target_type: CommentTarget,
        target_id: Uuid,
    ) -> AppResult<Vec<Comment>> {
        Ok(self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| c.target_type == target_type && c.target_id == target_id)
            .cloned()
            .collect())
    }

    async fn create(&self, data: &CreateComment) -> AppResult<Comment> {
        let comment = Comment {
            id: Uuid::new_v4(),
            target_type: data.target_type,
            target_id: data.target_id,
            author_id: data.author_id,
            body: data.body.clone(),
            created_at: Utc::now(),
        };
        self.comments.write().await.push(comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|c| c.id != id);
        Ok(comments.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sitehub_entity::Priority;

    use super::*;

    fn new_event(starts_at: DateTime<Utc>, hours: i64) -> CreateCalendarEvent {
        CreateCalendarEvent {
            project_id: None,
            title: "Crane inspection".into(),
            description: None,
            location: None,
            starts_at,
            ends_at: starts_at + Duration::hours(hours),
            all_day: false,
            created_by: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_window_matches_overlapping_events() {
        let store = MemoryCalendarStore::new();
        let start = Utc::now();
        let early = store.create(&new_event(start, 2)).await.unwrap();
        let late = store
            .create(&new_event(start + Duration::days(3), 1))
            .await
            .unwrap();

        let window = store
            .find_in_window(
                Some(start + Duration::hours(1)),
                Some(start + Duration::days(1)),
                None,
            )
            .await
            .unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].id, early.id);

        let all = store.find_in_window(None, None, None).await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[tokio::test]
    async fn test_task_update_keeps_unset_fields() {
        let store = MemoryTaskStore::new();
        let task = store
            .create(&CreateTask {
                project_id: None,
                title: "Rebar check".into(),
                description: Some("Grid C".into()),
                status: Default::default(),
                priority: Priority::High,
                assignee_id: None,
                due_date: None,
                created_by: Uuid::new_v4(),
            })
            .await
            .unwrap();

        let updated = store
            .update(
                task.id,
                &UpdateTask {
                    title: Some("Rebar check L2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Rebar check L2");
        assert_eq!(updated.description.as_deref(), Some("Grid C"));
        assert_eq!(updated.priority, Priority::High);

        assert!(store.delete(task.id).await.unwrap());
        assert!(!store.delete(task.id).await.unwrap());
    }
}
