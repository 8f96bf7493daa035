//! Activity log repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use sitehub_core::error::{AppError, ErrorKind};
use sitehub_core::result::AppResult;
use sitehub_core::types::pagination::{PageRequest, PageResponse};
use sitehub_entity::activity::{ActivityFilter, ActivityLog, NewActivity};

use crate::store::ActivityStore;

/// PostgreSQL-backed [`ActivityStore`].
#[derive(Debug, Clone)]
pub struct ActivityLogRepository {
    pool: PgPool,
}

impl ActivityLogRepository {
    /// Create a new activity log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for ActivityLogRepository {
    async fn append(&self, data: NewActivity) -> AppResult<ActivityLog> {
        sqlx::query_as::<_, ActivityLog>(
            "INSERT INTO activity_logs (actor_id, project_id, action, entity_type, entity_id, details) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.actor_id)
        .bind(data.project_id)
        .bind(&data.action)
        .bind(&data.entity_type)
        .bind(data.entity_id)
        .bind(&data.details)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append activity", e))
    }

    async fn search(
        &self,
        filter: &ActivityFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActivityLog>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if filter.project_id.is_some() {
            conditions.push(format!("project_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.entity_type.is_some() {
            conditions.push(format!("entity_type = ${param_idx}"));
            param_idx += 1;
        }
        if filter.entity_id.is_some() {
            conditions.push(format!("entity_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.actor_id.is_some() {
            conditions.push(format!("actor_id = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM activity_logs {where_clause}");
        let select_sql = format!(
            "SELECT * FROM activity_logs {where_clause} ORDER BY created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, ActivityLog>(&select_sql);

        if let Some(pid) = filter.project_id {
            count_query = count_query.bind(pid);
            select_query = select_query.bind(pid);
        }
        if let Some(et) = &filter.entity_type {
            count_query = count_query.bind(et.clone());
            select_query = select_query.bind(et.clone());
        }
        if let Some(eid) = filter.entity_id {
            count_query = count_query.bind(eid);
            select_query = select_query.bind(eid);
        }
        if let Some(aid) = filter.actor_id {
            count_query = count_query.bind(aid);
            select_query = select_query.bind(aid);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count activity", e)
        })?;

        let entries = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search activity", e))?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
