//! Fire-and-forget event publishing.

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use sitehub_core::events::{DomainEvent, EventName};
use sitehub_core::traits::EventPublisher;

/// Publish `entity` as the payload of `name`. Never fails the caller.
pub(crate) fn publish<T: Serialize>(
    publisher: &dyn EventPublisher,
    name: EventName,
    actor_id: Uuid,
    entity: &T,
) {
    match DomainEvent::for_entity(name, Some(actor_id), entity) {
        Ok(event) => {
            let listeners = publisher.publish(event);
            debug!(event = %name, listeners, "Published event");
        }
        Err(e) => warn!(event = %name, error = %e, "Failed to serialize event payload"),
    }
}
