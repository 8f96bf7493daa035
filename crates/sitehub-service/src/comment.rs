//! Comments on documents, tasks and issues.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sitehub_auth::{RbacEnforcer, SystemPermission};
use sitehub_core::error::AppError;
use sitehub_core::events::EventName;
use sitehub_core::traits::EventPublisher;
use sitehub_database::store::{CommentStore, DocumentStore, IssueStore, TaskStore};
use sitehub_entity::activity::NewActivity;
use sitehub_entity::comment::{Comment, CommentTarget, CreateComment};

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;
use crate::notify;

/// Maximum comment length in characters.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

/// Request to post a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    /// What is being commented on.
    pub target_type: CommentTarget,
    /// Target ID.
    pub target_id: Uuid,
    /// Text.
    pub body: String,
}

/// Manages comments.
#[derive(Debug, Clone)]
pub struct CommentService {
    comment_repo: Arc<dyn CommentStore>,
    documents: Arc<dyn DocumentStore>,
    task_repo: Arc<dyn TaskStore>,
    issue_repo: Arc<dyn IssueStore>,
    events: Arc<dyn EventPublisher>,
    rbac: Arc<RbacEnforcer>,
    activity: ActivityRecorder,
}

impl CommentService {
    /// Creates a new comment service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        comment_repo: Arc<dyn CommentStore>,
        documents: Arc<dyn DocumentStore>,
        task_repo: Arc<dyn TaskStore>,
        issue_repo: Arc<dyn IssueStore>,
        events: Arc<dyn EventPublisher>,
        rbac: Arc<RbacEnforcer>,
        activity: ActivityRecorder,
    ) -> Self {
        Self {
            comment_repo,
            documents,
            task_repo,
            issue_repo,
            events,
            rbac,
            activity,
        }
    }

    /// Fails with `NotFound` unless the target exists. Returns its project.
    async fn resolve_target(
        &self,
        target_type: CommentTarget,
        target_id: Uuid,
    ) -> Result<Option<Uuid>, AppError> {
        let project = match target_type {
            CommentTarget::Document => self
                .documents
                .find_by_id(target_id)
                .await?
                .map(|d| d.project_id),
            CommentTarget::Task => self
                .task_repo
                .find_by_id(target_id)
                .await?
                .map(|t| t.project_id),
            CommentTarget::Issue => self
                .issue_repo
                .find_by_id(target_id)
                .await?
                .map(|i| i.project_id),
        };
        project.ok_or_else(|| AppError::not_found(format!("{target_type} {target_id} not found")))
    }

    /// Comments on a target, oldest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        target_type: CommentTarget,
        target_id: Uuid,
    ) -> Result<Vec<Comment>, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        self.comment_repo.find_for_target(target_type, target_id).await
    }

    /// Posts a comment and emits `comment:new`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateCommentRequest,
    ) -> Result<Comment, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::CommentCreate)?;
        let body = req.body.trim();
        if body.is_empty() {
            return Err(AppError::validation("Comment body must not be empty"));
        }
        if body.chars().count() > MAX_COMMENT_LENGTH {
            return Err(AppError::validation(format!(
                "Comment body exceeds {MAX_COMMENT_LENGTH} characters"
            )));
        }
        let project_id = self.resolve_target(req.target_type, req.target_id).await?;

        let comment = self
            .comment_repo
            .create(&CreateComment {
                target_type: req.target_type,
                target_id: req.target_id,
                author_id: ctx.user_id,
                body: body.to_string(),
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            comment_id = %comment.id,
            target = %comment.target_type,
            target_id = %comment.target_id,
            "Comment posted"
        );
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "comment.create", "comment", comment.id)
                    .in_project(project_id)
                    .with_details(serde_json::json!({
                        "target_type": comment.target_type,
                        "target_id": comment.target_id,
                    })),
            )
            .await;
        notify::publish(self.events.as_ref(), EventName::CommentNew, ctx.user_id, &comment);
        Ok(comment)
    }

    /// Deletes a comment. Authors may delete their own; managers any.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let comment = self
            .comment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Comment {id} not found")))?;

        if !ctx.is(comment.author_id) {
            self.rbac
                .require_permission(&ctx.role, SystemPermission::CommentModerate)?;
        }

        self.comment_repo.delete(id).await?;
        info!(user_id = %ctx.user_id, comment_id = %id, "Comment deleted");
        self.activity
            .record(NewActivity::new(ctx.user_id, "comment.delete", "comment", id))
            .await;
        Ok(())
    }
}
