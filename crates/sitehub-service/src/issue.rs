//! Issue tracking with resolution stamping.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sitehub_auth::{RbacEnforcer, SystemPermission};
use sitehub_core::error::AppError;
use sitehub_core::events::EventName;
use sitehub_core::traits::EventPublisher;
use sitehub_core::types::{PageRequest, PageResponse};
use sitehub_database::store::{IssueFilter, IssueStore};
use sitehub_entity::Priority;
use sitehub_entity::activity::NewActivity;
use sitehub_entity::issue::{CreateIssue, Issue, UpdateIssue, next_resolved_at};

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;
use crate::notify;

/// Request to raise an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIssueRequest {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Related document.
    pub document_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Priority; defaults to medium.
    pub priority: Option<Priority>,
    /// Assignee.
    pub assignee_id: Option<Uuid>,
}

/// Manages issues.
#[derive(Debug, Clone)]
pub struct IssueService {
    issue_repo: Arc<dyn IssueStore>,
    events: Arc<dyn EventPublisher>,
    rbac: Arc<RbacEnforcer>,
    activity: ActivityRecorder,
}

impl IssueService {
    /// Creates a new issue service.
    pub fn new(
        issue_repo: Arc<dyn IssueStore>,
        events: Arc<dyn EventPublisher>,
        rbac: Arc<RbacEnforcer>,
        activity: ActivityRecorder,
    ) -> Self {
        Self {
            issue_repo,
            events,
            rbac,
            activity,
        }
    }

    /// Lists issues.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &IssueFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Issue>, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        self.issue_repo.find_all(filter, &page).await
    }

    /// Gets an issue.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Issue, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        self.issue_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Issue {id} not found")))
    }

    /// Raises an issue reported by the caller and emits `issue:new`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateIssueRequest,
    ) -> Result<Issue, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::WorkItemWrite)?;
        if req.title.trim().is_empty() {
            return Err(AppError::validation("title must not be empty"));
        }

        let issue = self
            .issue_repo
            .create(&CreateIssue {
                project_id: req.project_id,
                document_id: req.document_id,
                title: req.title.trim().to_string(),
                description: req.description,
                priority: req.priority.unwrap_or_default(),
                reporter_id: ctx.user_id,
                assignee_id: req.assignee_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, issue_id = %issue.id, "Issue raised");
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "issue.create", "issue", issue.id)
                    .in_project(issue.project_id),
            )
            .await;
        notify::publish(self.events.as_ref(), EventName::IssueNew, ctx.user_id, &issue);
        Ok(issue)
    }

    /// Applies a partial update. Entering resolved/closed stamps
    /// `resolved_at`; reopening clears it.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: UpdateIssue,
    ) -> Result<Issue, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::WorkItemWrite)?;
        if changes.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::validation("title must not be empty"));
        }

        let current = self.get(ctx, id).await?;
        let status = changes.status.unwrap_or(current.status);
        let resolved_at = next_resolved_at(current.resolved_at, status, Utc::now());

        let issue = self.issue_repo.update(id, &changes, resolved_at).await?;
        info!(user_id = %ctx.user_id, issue_id = %id, status = %issue.status, "Issue updated");
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "issue.update", "issue", id)
                    .in_project(issue.project_id)
                    .with_details(serde_json::json!({ "status": issue.status })),
            )
            .await;
        Ok(issue)
    }

    /// Deletes an issue.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::WorkItemDelete)?;
        let issue = self.get(ctx, id).await?;
        self.issue_repo.delete(id).await?;

        info!(user_id = %ctx.user_id, issue_id = %id, "Issue deleted");
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "issue.delete", "issue", id)
                    .in_project(issue.project_id),
            )
            .await;
        Ok(())
    }
}
