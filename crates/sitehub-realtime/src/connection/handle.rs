//! A single WebSocket connection.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use sitehub_entity::user::UserRole;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// Outcome of pushing a frame to a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Frame queued.
    Queued,
    /// Buffer full; frame dropped.
    Dropped,
    /// The socket task is gone.
    Closed,
}

/// Sender side of one client connection plus cached user metadata.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Connection ID.
    pub id: ConnectionId,
    /// Authenticated user.
    pub user_id: Uuid,
    /// Username, for logs.
    pub username: String,
    /// Role at connect time.
    pub role: UserRole,
    /// When the socket was accepted.
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<String>,
    alive: AtomicBool,
    dropped: AtomicU64,
}

impl ConnectionHandle {
    /// Create a handle around an outbound channel.
    pub fn new(
        user_id: Uuid,
        username: String,
        role: UserRole,
        sender: mpsc::Sender<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            username,
            role,
            connected_at: Utc::now(),
            sender,
            alive: AtomicBool::new(true),
            dropped: AtomicU64::new(0),
        }
    }

    /// Queue a text frame without waiting.
    pub fn send(&self, frame: String) -> SendOutcome {
        if !self.is_alive() {
            return SendOutcome::Closed;
        }
        match self.sender.try_send(frame) {
            Ok(()) => SendOutcome::Queued,
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping frame");
                SendOutcome::Dropped
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                SendOutcome::Closed
            }
        }
    }

    /// Whether the socket task is still running.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the connection closed.
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Frames dropped because the buffer was full.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
