//! Project repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use sitehub_core::error::{AppError, ErrorKind};
use sitehub_core::result::AppResult;
use sitehub_core::types::pagination::{PageRequest, PageResponse};
use sitehub_entity::project::{CreateProject, Project, ProjectStatus, UpdateProject};

/// Repository for projects.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a project by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    /// List projects, optionally by status and name/code search.
    pub async fn find_all(
        &self,
        status: Option<ProjectStatus>,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Project>> {
        let pattern = search.map(|q| format!("%{q}%"));
        let where_clause = "WHERE ($1::project_status IS NULL OR status = $1) \
                            AND ($2::text IS NULL OR name ILIKE $2 OR code ILIKE $2)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM projects {where_clause}"))
                .bind(status)
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count projects", e)
                })?;

        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT * FROM projects {where_clause} ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(status)
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))?;

        Ok(PageResponse::new(
            projects,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a project.
    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (code, name, description, status, location, start_date, end_date, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&data.code)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.status)
        .bind(&data.location)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("projects_code_key") => {
                AppError::conflict(format!("Project code '{}' already exists", data.code))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create project", e),
        })
    }

    /// Apply a partial update to a project.
    pub async fn update(&self, id: Uuid, data: &UpdateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET name = COALESCE($2, name), \
                                 description = COALESCE($3, description), \
                                 status = COALESCE($4, status), \
                                 location = COALESCE($5, location), \
                                 start_date = COALESCE($6, start_date), \
                                 end_date = COALESCE($7, end_date), \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.status)
        .bind(&data.location)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("projects_dates_check") =>
            {
                AppError::validation("end_date must not be before start_date")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update project", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Delete a project. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete project", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count open tasks, open issues and events starting within `days`.
    pub async fn work_counts(&self, id: Uuid, days: i32) -> AppResult<(i64, i64, i64)> {
        sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT \
               (SELECT COUNT(*) FROM tasks WHERE project_id = $1 AND status <> 'done'), \
               (SELECT COUNT(*) FROM issues WHERE project_id = $1 AND status IN ('open', 'in_progress')), \
               (SELECT COUNT(*) FROM calendar_events WHERE project_id = $1 \
                  AND starts_at >= NOW() AND starts_at < NOW() + make_interval(days => $2))",
        )
        .bind(id)
        .bind(days)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to summarize project", e))
    }
}
