//! Inbound and outbound WebSocket frames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sitehub_core::events::DomainEvent;

/// Frame pushed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Event name, e.g. `document:new`.
    pub event: String,
    /// Event payload, usually the affected entity.
    pub payload: serde_json::Value,
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
}

impl OutboundMessage {
    /// Reply to a client ping.
    pub fn pong() -> Self {
        Self {
            event: "pong".to_string(),
            payload: serde_json::json!({}),
            timestamp: Utc::now(),
        }
    }

    /// Serialize to a text frame.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl From<&DomainEvent> for OutboundMessage {
    fn from(event: &DomainEvent) -> Self {
        Self {
            event: event.name.as_str().to_string(),
            payload: event.payload.clone(),
            timestamp: event.timestamp,
        }
    }
}

/// Frames accepted from clients. Anything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Application-level keepalive.
    Ping,
}

impl InboundMessage {
    /// Parse a client text frame, returning `None` for unknown frames.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitehub_core::events::EventName;

    #[test]
    fn test_outbound_frame_shape() {
        let event = DomainEvent::new(
            EventName::DocumentNew,
            None,
            serde_json::json!({"name": "A-101"}),
        );
        let frame: serde_json::Value =
            serde_json::from_str(&OutboundMessage::from(&event).to_json()).unwrap();
        assert_eq!(frame["event"], "document:new");
        assert_eq!(frame["payload"]["name"], "A-101");
        assert!(frame["timestamp"].is_string());
    }

    #[test]
    fn test_inbound_parse() {
        assert_eq!(
            InboundMessage::parse(r#"{"type":"ping"}"#),
            Some(InboundMessage::Ping)
        );
        assert_eq!(InboundMessage::parse(r#"{"type":"subscribe"}"#), None);
        assert_eq!(InboundMessage::parse("not json"), None);
    }
}
