//! Broadcast hub: fans domain events out to every connection.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use sitehub_core::config::RealtimeConfig;
use sitehub_core::error::AppError;
use sitehub_core::events::DomainEvent;
use sitehub_core::result::AppResult;
use sitehub_core::traits::EventPublisher;
use sitehub_entity::user::UserRole;

use crate::connection::handle::{ConnectionHandle, ConnectionId, SendOutcome};
use crate::connection::pool::ConnectionPool;
use crate::message::OutboundMessage;

/// Registry of live sockets and the [`EventPublisher`] services push into.
#[derive(Debug)]
pub struct RealtimeHub {
    pool: ConnectionPool,
    config: RealtimeConfig,
}

impl RealtimeHub {
    /// Create a hub.
    pub fn new(config: RealtimeConfig) -> Self {
        info!(
            buffer = config.channel_buffer_size,
            max_connections = config.max_connections,
            "Realtime hub initialized"
        );
        Self {
            pool: ConnectionPool::new(),
            config,
        }
    }

    /// Register an authenticated connection.
    ///
    /// Returns the handle and the receiver the socket task drains.
    pub fn register(
        &self,
        user_id: Uuid,
        username: String,
        role: UserRole,
    ) -> AppResult<(Arc<ConnectionHandle>, mpsc::Receiver<String>)> {
        if self.pool.connection_count() >= self.config.max_connections {
            warn!(user_id = %user_id, "Rejecting WebSocket: connection limit reached");
            return Err(AppError::service_unavailable(
                "Too many realtime connections",
            ));
        }

        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(user_id, username, role, tx));
        self.pool.add(handle.clone());

        info!(
            conn_id = %handle.id,
            user_id = %user_id,
            username = %handle.username,
            "WebSocket connection registered"
        );
        Ok((handle, rx))
    }

    /// Remove a connection.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_closed();
            info!(
                conn_id = %conn_id,
                user_id = %handle.user_id,
                dropped = handle.dropped_count(),
                "WebSocket connection unregistered"
            );
        }
    }

    /// Open connections.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Distinct connected users.
    pub fn user_count(&self) -> usize {
        self.pool.user_count()
    }

    /// Server ping interval.
    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.config.ping_interval_seconds)
    }

    /// Push one frame to every live connection; returns how many queued it.
    pub fn broadcast(&self, message: &OutboundMessage) -> usize {
        let frame = message.to_json();
        let mut delivered = 0;
        for handle in self.pool.all() {
            match handle.send(frame.clone()) {
                SendOutcome::Queued => delivered += 1,
                SendOutcome::Dropped => {}
                SendOutcome::Closed => self.unregister(&handle.id),
            }
        }
        delivered
    }
}

impl EventPublisher for RealtimeHub {
    fn publish(&self, event: DomainEvent) -> usize {
        let delivered = self.broadcast(&OutboundMessage::from(&event));
        debug!(event = %event.name, delivered, "Event broadcast");
        delivered
    }
}
