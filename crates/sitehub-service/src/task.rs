//! Task tracking.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sitehub_auth::{RbacEnforcer, SystemPermission};
use sitehub_core::error::AppError;
use sitehub_core::events::EventName;
use sitehub_core::traits::EventPublisher;
use sitehub_core::types::{PageRequest, PageResponse};
use sitehub_database::store::{TaskFilter, TaskStore};
use sitehub_entity::Priority;
use sitehub_entity::activity::NewActivity;
use sitehub_entity::task::{CreateTask, Task, TaskStatus, UpdateTask};

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;
use crate::notify;

/// Request to create a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Initial status; defaults to todo.
    pub status: Option<TaskStatus>,
    /// Priority; defaults to medium.
    pub priority: Option<Priority>,
    /// Assignee.
    pub assignee_id: Option<Uuid>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
}

/// Manages tasks.
#[derive(Debug, Clone)]
pub struct TaskService {
    task_repo: Arc<dyn TaskStore>,
    events: Arc<dyn EventPublisher>,
    rbac: Arc<RbacEnforcer>,
    activity: ActivityRecorder,
}

impl TaskService {
    /// Creates a new task service.
    pub fn new(
        task_repo: Arc<dyn TaskStore>,
        events: Arc<dyn EventPublisher>,
        rbac: Arc<RbacEnforcer>,
        activity: ActivityRecorder,
    ) -> Self {
        Self {
            task_repo,
            events,
            rbac,
            activity,
        }
    }

    /// Lists tasks.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Task>, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        self.task_repo.find_all(filter, &page).await
    }

    /// Gets a task.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Task, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        self.task_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Task {id} not found")))
    }

    /// Creates a task and emits `task:new`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateTaskRequest,
    ) -> Result<Task, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::WorkItemWrite)?;
        if req.title.trim().is_empty() {
            return Err(AppError::validation("title must not be empty"));
        }

        let task = self
            .task_repo
            .create(&CreateTask {
                project_id: req.project_id,
                title: req.title.trim().to_string(),
                description: req.description,
                status: req.status.unwrap_or_default(),
                priority: req.priority.unwrap_or_default(),
                assignee_id: req.assignee_id,
                due_date: req.due_date,
                created_by: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, task_id = %task.id, "Task created");
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "task.create", "task", task.id)
                    .in_project(task.project_id),
            )
            .await;
        notify::publish(self.events.as_ref(), EventName::TaskNew, ctx.user_id, &task);
        Ok(task)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: UpdateTask,
    ) -> Result<Task, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::WorkItemWrite)?;
        if changes.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::validation("title must not be empty"));
        }

        let task = self.task_repo.update(id, &changes).await?;
        info!(user_id = %ctx.user_id, task_id = %id, status = %task.status, "Task updated");
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "task.update", "task", id)
                    .in_project(task.project_id)
                    .with_details(serde_json::json!({ "status": task.status })),
            )
            .await;
        Ok(task)
    }

    /// Deletes a task.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::WorkItemDelete)?;
        let task = self.get(ctx, id).await?;
        self.task_repo.delete(id).await?;

        info!(user_id = %ctx.user_id, task_id = %id, "Task deleted");
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "task.delete", "task", id)
                    .in_project(task.project_id),
            )
            .await;
        Ok(())
    }
}
