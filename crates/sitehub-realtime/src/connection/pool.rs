//! Connection pool indexed by connection and user.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use super::handle::{ConnectionHandle, ConnectionId};

/// Thread-safe registry of live connections.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
    by_user: DashMap<Uuid, Vec<ConnectionId>>,
}

impl ConnectionPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection.
    pub fn add(&self, handle: Arc<ConnectionHandle>) {
        self.by_user.entry(handle.user_id).or_default().push(handle.id);
        self.by_id.insert(handle.id, handle);
    }

    /// Remove a connection, returning it if present.
    pub fn remove(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.by_id.remove(conn_id)?;
        if let Some(mut ids) = self.by_user.get_mut(&handle.user_id) {
            ids.retain(|id| id != conn_id);
            if ids.is_empty() {
                drop(ids);
                self.by_user.remove_if(&handle.user_id, |_, ids| ids.is_empty());
            }
        }
        Some(handle)
    }

    /// Snapshot of every live handle.
    pub fn all(&self) -> Vec<Arc<ConnectionHandle>> {
        self.by_id.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of open connections.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }

    /// Number of distinct connected users.
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }
}
