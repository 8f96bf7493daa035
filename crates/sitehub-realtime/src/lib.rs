//! # sitehub-realtime
//!
//! Real-time notification engine. Every authenticated WebSocket client
//! registers with the [`RealtimeHub`] and receives every published
//! [`DomainEvent`](sitehub_core::events::DomainEvent) as a JSON frame.
//! Delivery is at-most-once: a client whose buffer is full misses events.

pub mod connection;
pub mod hub;
pub mod message;

pub use connection::handle::{ConnectionHandle, ConnectionId};
pub use hub::RealtimeHub;
pub use message::{InboundMessage, OutboundMessage};
