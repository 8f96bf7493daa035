//! Response DTOs.
//!
//! Domain entities serialize directly; only endpoints without a matching
//! entity get a dedicated type here.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// `"connected"` or `"unreachable"`.
    pub database: String,
    /// Open WebSocket connections.
    pub ws_connections: usize,
    /// Distinct users with at least one open connection.
    pub online_users: usize,
}
