//! Activity log: recording mutations and querying the log.

use std::sync::Arc;

use tracing::warn;

use sitehub_auth::{RbacEnforcer, SystemPermission};
use sitehub_core::error::AppError;
use sitehub_core::types::{PageRequest, PageResponse};
use sitehub_database::store::ActivityStore;
use sitehub_entity::activity::{ActivityFilter, ActivityLog, NewActivity};

use crate::context::RequestContext;

/// Appends activity entries on behalf of the other services.
///
/// Recording happens after the mutation has been committed. A failed append
/// is logged and does not fail the request.
#[derive(Debug, Clone)]
pub struct ActivityRecorder {
    store: Arc<dyn ActivityStore>,
}

impl ActivityRecorder {
    /// Creates a recorder writing into `store`.
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    /// Append an entry.
    pub async fn record(&self, entry: NewActivity) {
        let action = entry.action.clone();
        if let Err(e) = self.store.append(entry).await {
            warn!(action = %action, error = %e, "Failed to write activity log entry");
        }
    }
}

/// Read access to the activity log.
#[derive(Debug, Clone)]
pub struct ActivityService {
    store: Arc<dyn ActivityStore>,
    rbac: Arc<RbacEnforcer>,
}

impl ActivityService {
    /// Creates a new activity service.
    pub fn new(store: Arc<dyn ActivityStore>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { store, rbac }
    }

    /// Search the log, newest first. Manager or above.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        filter: &ActivityFilter,
        page: PageRequest,
    ) -> Result<PageResponse<ActivityLog>, AppError> {
        self.rbac
            .require_permission(&ctx.role, SystemPermission::ActivityView)?;
        self.store.search(filter, &page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitehub_core::error::ErrorKind;
    use sitehub_database::store::MemoryActivityStore;
    use sitehub_entity::user::UserRole;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_search_requires_manager() {
        let store = Arc::new(MemoryActivityStore::new());
        let recorder = ActivityRecorder::new(store.clone());
        let service = ActivityService::new(store, Arc::new(RbacEnforcer::new()));
        let actor = Uuid::new_v4();
        recorder
            .record(NewActivity::new(actor, "task.create", "task", Uuid::new_v4()))
            .await;

        let viewer = RequestContext::new(actor, "viewer", UserRole::Contributor);
        let err = service
            .search(&viewer, &ActivityFilter::default(), PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let manager = RequestContext::new(Uuid::new_v4(), "pm", UserRole::Manager);
        let page = service
            .search(&manager, &ActivityFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_items, 1);
    }
}
