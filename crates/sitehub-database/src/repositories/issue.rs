//! Issue repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use sitehub_core::error::{AppError, ErrorKind};
use sitehub_core::result::AppResult;
use sitehub_core::types::pagination::{PageRequest, PageResponse};
use sitehub_entity::issue::{CreateIssue, Issue, UpdateIssue};

use crate::store::{IssueFilter, IssueStore};

/// Repository for issues.
#[derive(Debug, Clone)]
pub struct IssueRepository {
    pool: PgPool,
}

impl IssueRepository {
    /// Create a new issue repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IssueStore for IssueRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Issue>> {
        sqlx::query_as::<_, Issue>("SELECT * FROM issues WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find issue", e))
    }

    async fn find_all(
        &self,
        filter: &IssueFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Issue>> {
        let where_clause = "WHERE ($1::uuid IS NULL OR project_id = $1) \
                            AND ($2::uuid IS NULL OR document_id = $2) \
                            AND ($3::issue_status IS NULL OR status = $3)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM issues {where_clause}"))
            .bind(filter.project_id)
            .bind(filter.document_id)
            .bind(filter.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count issues", e))?;

        let issues = sqlx::query_as::<_, Issue>(&format!(
            "SELECT * FROM issues {where_clause} ORDER BY created_at DESC LIMIT $4 OFFSET $5"
        ))
        .bind(filter.project_id)
        .bind(filter.document_id)
        .bind(filter.status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list issues", e))?;

        Ok(PageResponse::new(
            issues,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn create(&self, data: &CreateIssue) -> AppResult<Issue> {
        sqlx::query_as::<_, Issue>(
            "INSERT INTO issues (project_id, document_id, title, description, priority, reporter_id, assignee_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.project_id)
        .bind(data.document_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.priority)
        .bind(data.reporter_id)
        .bind(data.assignee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::validation("Referenced project, document or assignee does not exist")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create issue", e),
        })
    }

    async fn update(
        &self,
        id: Uuid,
        data: &UpdateIssue,
        resolved_at: Option<DateTime<Utc>>,
    ) -> AppResult<Issue> {
        sqlx::query_as::<_, Issue>(
            "UPDATE issues SET title = COALESCE($2, title), \
                               description = COALESCE($3, description), \
                               status = COALESCE($4, status), \
                               priority = COALESCE($5, priority), \
                               assignee_id = COALESCE($6, assignee_id), \
                               resolved_at = $7, \
                               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.assignee_id)
        .bind(resolved_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update issue", e))?
        .ok_or_else(|| AppError::not_found(format!("Issue {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM issues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete issue", e))?;
        Ok(result.rows_affected() > 0)
    }
}
