//! Document repository: live rows, history and certifications.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use sitehub_core::error::{AppError, ErrorKind};
use sitehub_core::result::AppResult;
use sitehub_core::types::pagination::{PageRequest, PageResponse};
use sitehub_entity::document::{
    Certification, Document, DocumentChanges, DocumentHistory, DocumentStatus, HistoryAction,
    NewCertification, NewDocument,
};

use crate::store::{DocumentFilter, DocumentStore, Recorded};

/// PostgreSQL-backed [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> AppResult<Transaction<'_, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    async fn append_history(
        tx: &mut Transaction<'_, Postgres>,
        document: &Document,
        action: HistoryAction,
        actor_id: Option<Uuid>,
    ) -> AppResult<DocumentHistory> {
        sqlx::query_as::<_, DocumentHistory>(
            "INSERT INTO document_history (document_id, name, url, version, status, action, actor_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(document.id)
        .bind(&document.name)
        .bind(&document.url)
        .bind(document.version)
        .bind(document.status)
        .bind(action)
        .bind(actor_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append document history", e))
    }

    async fn lock_document(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> AppResult<Document> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load document", e))?
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    async fn commit(tx: Transaction<'_, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn list(
        &self,
        filter: &DocumentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if filter.project_id.is_some() {
            conditions.push(format!("project_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.category.is_some() {
            conditions.push(format!("LOWER(category) = LOWER(${param_idx})"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!("name ILIKE ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM documents {where_clause}");
        let select_sql = format!(
            "SELECT * FROM documents {where_clause} ORDER BY updated_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Document>(&select_sql);

        if let Some(pid) = filter.project_id {
            count_query = count_query.bind(pid);
            select_query = select_query.bind(pid);
        }
        if let Some(status) = filter.status {
            count_query = count_query.bind(status);
            select_query = select_query.bind(status);
        }
        if let Some(category) = &filter.category {
            count_query = count_query.bind(category.clone());
            select_query = select_query.bind(category.clone());
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            count_query = count_query.bind(pattern.clone());
            select_query = select_query.bind(pattern);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
        })?;

        let documents = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))?;

        Ok(PageResponse::new(
            documents,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    async fn create(&self, data: NewDocument, actor_id: Option<Uuid>) -> AppResult<Recorded> {
        let mut tx = self.begin().await?;

        let document = sqlx::query_as::<_, Document>(
            "INSERT INTO documents (project_id, name, url, version, status, category, uploaded_by, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.project_id)
        .bind(&data.name)
        .bind(&data.url)
        .bind(data.version)
        .bind(data.status)
        .bind(&data.category)
        .bind(data.uploaded_by)
        .bind(&data.metadata)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::validation("Referenced project or user does not exist")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create document", e),
        })?;

        let history =
            Self::append_history(&mut tx, &document, HistoryAction::Upload, actor_id).await?;
        Self::commit(tx).await?;
        Ok(Recorded { document, history })
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &DocumentChanges,
        actor_id: Option<Uuid>,
    ) -> AppResult<Recorded> {
        let mut tx = self.begin().await?;

        let document = sqlx::query_as::<_, Document>(
            "UPDATE documents SET name = COALESCE($2, name), \
                                  url = COALESCE($3, url), \
                                  version = COALESCE($4, version), \
                                  status = COALESCE($5, status), \
                                  category = COALESCE($6, category), \
                                  metadata = COALESCE($7, metadata), \
                                  updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.url)
        .bind(changes.version)
        .bind(changes.status)
        .bind(&changes.category)
        .bind(&changes.metadata)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))?
        .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))?;

        let history =
            Self::append_history(&mut tx, &document, HistoryAction::Update, actor_id).await?;
        Self::commit(tx).await?;
        Ok(Recorded { document, history })
    }

    async fn delete(&self, id: Uuid, actor_id: Option<Uuid>) -> AppResult<DocumentHistory> {
        let mut tx = self.begin().await?;

        let document = Self::lock_document(&mut tx, id).await?;
        let history =
            Self::append_history(&mut tx, &document, HistoryAction::Delete, actor_id).await?;

        sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete document", e))?;

        Self::commit(tx).await?;
        Ok(history)
    }

    async fn restore(&self, history_id: Uuid, actor_id: Option<Uuid>) -> AppResult<Recorded> {
        let mut tx = self.begin().await?;

        let entry = sqlx::query_as::<_, DocumentHistory>(
            "SELECT * FROM document_history WHERE id = $1",
        )
        .bind(history_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load history entry", e))?
        .ok_or_else(|| AppError::not_found(format!("History entry {history_id} not found")))?;

        let mut document = Self::lock_document(&mut tx, entry.document_id).await?;
        document.restore_from(&entry);

        let document = sqlx::query_as::<_, Document>(
            "UPDATE documents SET name = $2, url = $3, version = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(document.id)
        .bind(&document.name)
        .bind(&document.url)
        .bind(document.version)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to restore document", e))?;

        let history =
            Self::append_history(&mut tx, &document, HistoryAction::Restore, actor_id).await?;
        Self::commit(tx).await?;
        Ok(Recorded { document, history })
    }

    async fn history(&self, document_id: Uuid) -> AppResult<Vec<DocumentHistory>> {
        sqlx::query_as::<_, DocumentHistory>(
            "SELECT * FROM document_history WHERE document_id = $1 ORDER BY created_at DESC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load document history", e))
    }

    async fn add_certification(&self, data: NewCertification) -> AppResult<Certification> {
        sqlx::query_as::<_, Certification>(
            "INSERT INTO certifications (document_id, certification_type, notes, certified_by) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.document_id)
        .bind(&data.certification_type)
        .bind(&data.notes)
        .bind(data.certified_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("Document {} not found", data.document_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to add certification", e),
        })
    }

    async fn certifications(&self, document_id: Uuid) -> AppResult<Vec<Certification>> {
        sqlx::query_as::<_, Certification>(
            "SELECT * FROM certifications WHERE document_id = $1 ORDER BY certified_at DESC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list certifications", e))
    }

    async fn count_by_status(&self, project_id: Uuid) -> AppResult<Vec<(DocumentStatus, i64)>> {
        sqlx::query_as::<_, (DocumentStatus, i64)>(
            "SELECT status, COUNT(*) FROM documents WHERE project_id = $1 GROUP BY status ORDER BY status",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count documents", e))
    }

    async fn project_code(&self, project_id: Uuid) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT code FROM projects WHERE id = $1")
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load project code", e))
    }
}
