//! Domain events emitted by SiteHub mutations.
//!
//! Events are handed to an [`EventPublisher`](crate::traits::EventPublisher)
//! and relayed by the real-time engine to every connected client as a
//! "refresh now" hint. Delivery is best effort.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;

/// Names of the events clients can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventName {
    /// A document was created or uploaded.
    #[serde(rename = "document:new")]
    DocumentNew,
    /// A document was approved (status set to Published).
    #[serde(rename = "document:approved")]
    DocumentApproved,
    /// A task was created.
    #[serde(rename = "task:new")]
    TaskNew,
    /// An issue was raised.
    #[serde(rename = "issue:new")]
    IssueNew,
    /// A comment was posted.
    #[serde(rename = "comment:new")]
    CommentNew,
    /// A calendar event was created.
    #[serde(rename = "calendar:event:created")]
    CalendarEventCreated,
    /// A calendar event was updated.
    #[serde(rename = "calendar:event:updated")]
    CalendarEventUpdated,
    /// A calendar event was deleted.
    #[serde(rename = "calendar:event:deleted")]
    CalendarEventDeleted,
}

impl EventName {
    /// The wire name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentNew => "document:new",
            Self::DocumentApproved => "document:approved",
            Self::TaskNew => "task:new",
            Self::IssueNew => "issue:new",
            Self::CommentNew => "comment:new",
            Self::CalendarEventCreated => "calendar:event:created",
            Self::CalendarEventUpdated => "calendar:event:updated",
            Self::CalendarEventDeleted => "calendar:event:deleted",
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mutation notification carrying the raw mutated entity as payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// Event name.
    pub name: EventName,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event.
    pub actor_id: Option<Uuid>,
    /// The mutated entity, serialized.
    pub payload: serde_json::Value,
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(name: EventName, actor_id: Option<Uuid>, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// Create an event whose payload is the serialized `entity`.
    pub fn for_entity<T: Serialize>(
        name: EventName,
        actor_id: Option<Uuid>,
        entity: &T,
    ) -> AppResult<Self> {
        Ok(Self::new(name, actor_id, serde_json::to_value(entity)?))
    }
}
