//! Task repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use sitehub_core::error::{AppError, ErrorKind};
use sitehub_core::result::AppResult;
use sitehub_core::types::pagination::{PageRequest, PageResponse};
use sitehub_entity::task::{CreateTask, Task, UpdateTask};

use crate::store::{TaskFilter, TaskStore};

/// Repository for tasks.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    /// Create a new task repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for TaskRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find task", e))
    }

    async fn find_all(
        &self,
        filter: &TaskFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Task>> {
        let where_clause = "WHERE ($1::uuid IS NULL OR project_id = $1) \
                            AND ($2::uuid IS NULL OR assignee_id = $2) \
                            AND ($3::task_status IS NULL OR status = $3)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM tasks {where_clause}"))
            .bind(filter.project_id)
            .bind(filter.assignee_id)
            .bind(filter.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tasks", e))?;

        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT * FROM tasks {where_clause} \
             ORDER BY due_date ASC NULLS LAST, created_at DESC LIMIT $4 OFFSET $5"
        ))
        .bind(filter.project_id)
        .bind(filter.assignee_id)
        .bind(filter.status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tasks", e))?;

        Ok(PageResponse::new(
            tasks,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn create(&self, data: &CreateTask) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (project_id, title, description, status, priority, assignee_id, due_date, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.project_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.assignee_id)
        .bind(data.due_date)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::validation("Referenced project or assignee does not exist")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create task", e),
        })
    }

    async fn update(&self, id: Uuid, data: &UpdateTask) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET title = COALESCE($2, title), \
                              description = COALESCE($3, description), \
                              status = COALESCE($4, status), \
                              priority = COALESCE($5, priority), \
                              assignee_id = COALESCE($6, assignee_id), \
                              due_date = COALESCE($7, due_date), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.assignee_id)
        .bind(data.due_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::validation("Referenced assignee does not exist")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update task", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Task {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete task", e))?;
        Ok(result.rows_affected() > 0)
    }
}
