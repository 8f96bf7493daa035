//! Project CRUD and the dashboard summary.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sitehub_auth::{RbacEnforcer, SystemPermission};
use sitehub_core::error::AppError;
use sitehub_core::types::{PageRequest, PageResponse};
use sitehub_database::repositories::ProjectRepository;
use sitehub_database::store::DocumentStore;
use sitehub_entity::activity::NewActivity;
use sitehub_entity::document::DocumentStatus;
use sitehub_entity::project::{
    CreateProject, Project, ProjectStatus, ProjectSummary, UpdateProject,
};

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;

/// Window for "upcoming" calendar events in the summary.
pub const UPCOMING_WINDOW_DAYS: i32 = 14;

/// Request to create a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// Short code, 2-12 alphanumerics. Stored upper-case.
    pub code: String,
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Initial status; defaults to planning.
    pub status: Option<ProjectStatus>,
    /// Site location.
    pub location: Option<String>,
    /// Start date.
    pub start_date: Option<NaiveDate>,
    /// End date.
    pub end_date: Option<NaiveDate>,
}

/// Normalize a project code to upper case and check its shape.
pub fn normalize_code(code: &str) -> Result<String, AppError> {
    let code = code.trim().to_ascii_uppercase();
    if (2..=12).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(code)
    } else {
        Err(AppError::validation(
            "Project code must be 2-12 letters or digits",
        ))
    }
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), AppError> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(AppError::validation(
            "end_date must not be before start_date",
        )),
        _ => Ok(()),
    }
}

/// Fill every status with its count, zero when absent.
fn status_counts(counts: &[(DocumentStatus, i64)]) -> BTreeMap<String, i64> {
    DocumentStatus::ALL
        .iter()
        .map(|status| {
            let n = counts
                .iter()
                .find(|(s, _)| s == status)
                .map(|(_, n)| *n)
                .unwrap_or(0);
            (status.as_str().to_string(), n)
        })
        .collect()
}

/// Manages projects.
#[derive(Debug, Clone)]
pub struct ProjectService {
    /// Project repository.
    project_repo: Arc<ProjectRepository>,
    /// Document counts for the summary.
    documents: Arc<dyn DocumentStore>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
    /// Activity log.
    activity: ActivityRecorder,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(
        project_repo: Arc<ProjectRepository>,
        documents: Arc<dyn DocumentStore>,
        rbac: Arc<RbacEnforcer>,
        activity: ActivityRecorder,
    ) -> Self {
        Self {
            project_repo,
            documents,
            rbac,
            activity,
        }
    }

    /// Lists projects.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<ProjectStatus>,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<PageResponse<Project>, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        self.project_repo.find_all(status, search, &page).await
    }

    /// Gets a project.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Project, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ContentRead)?;
        self.project_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Creates a project owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateProjectRequest,
    ) -> Result<Project, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ProjectManage)?;
        let code = normalize_code(&req.code)?;
        if req.name.trim().is_empty() {
            return Err(AppError::validation("name must not be empty"));
        }
        check_dates(req.start_date, req.end_date)?;

        let project = self
            .project_repo
            .create(&CreateProject {
                code,
                name: req.name.trim().to_string(),
                description: req.description,
                status: req.status.unwrap_or_default(),
                location: req.location,
                start_date: req.start_date,
                end_date: req.end_date,
                owner_id: Some(ctx.user_id),
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            project_id = %project.id,
            code = %project.code,
            "Project created"
        );
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "project.create", "project", project.id)
                    .in_project(Some(project.id)),
            )
            .await;
        Ok(project)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: UpdateProject,
    ) -> Result<Project, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ProjectManage)?;
        let current = self.get(ctx, id).await?;
        check_dates(
            changes.start_date.or(current.start_date),
            changes.end_date.or(current.end_date),
        )?;

        let project = self.project_repo.update(id, &changes).await?;
        info!(user_id = %ctx.user_id, project_id = %id, "Project updated");
        self.activity
            .record(
                NewActivity::new(ctx.user_id, "project.update", "project", id)
                    .in_project(Some(id)),
            )
            .await;
        Ok(project)
    }

    /// Deletes a project. Its documents are kept and detached.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ProjectManage)?;
        if !self.project_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Project {id} not found")));
        }
        info!(user_id = %ctx.user_id, project_id = %id, "Project deleted");
        self.activity
            .record(NewActivity::new(ctx.user_id, "project.delete", "project", id))
            .await;
        Ok(())
    }

    /// Document counts by status plus open work and upcoming events.
    pub async fn summary(&self, ctx: &RequestContext, id: Uuid) -> Result<ProjectSummary, AppError> {
        let project = self.get(ctx, id).await?;
        let counts = self.documents.count_by_status(project.id).await?;
        let (open_tasks, open_issues, upcoming_events) = self
            .project_repo
            .work_counts(project.id, UPCOMING_WINDOW_DAYS)
            .await?;

        Ok(ProjectSummary {
            project_id: project.id,
            documents_by_status: status_counts(&counts),
            open_tasks,
            open_issues,
            upcoming_events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" twr1 ").unwrap(), "TWR1");
        assert!(normalize_code("A").is_err());
        assert!(normalize_code("TWR-1").is_err());
        assert!(normalize_code("ABCDEFGHIJKLM").is_err());
    }

    #[test]
    fn test_check_dates() {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
        assert!(check_dates(d("2025-01-01"), d("2025-06-30")).is_ok());
        assert!(check_dates(d("2025-06-30"), d("2025-01-01")).is_err());
        assert!(check_dates(None, d("2025-01-01")).is_ok());
    }

    #[test]
    fn test_status_counts_fill_zero() {
        let counts = status_counts(&[(DocumentStatus::Published, 3)]);
        assert_eq!(counts.len(), 4);
        assert_eq!(counts["Published"], 3);
        assert_eq!(counts["WIP"], 0);
    }
}
