//! Event publisher trait for the real-time notifier.

use crate::events::DomainEvent;

/// Sink for domain events.
///
/// Publishing is fire-and-forget: implementations must not block and must
/// not fail the mutation that produced the event. The return value is the
/// number of listeners the event was handed to.
pub trait EventPublisher: Send + Sync + std::fmt::Debug + 'static {
    /// Publish an event to all current listeners.
    fn publish(&self, event: DomainEvent) -> usize;
}

/// Publisher that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPublisher;

impl EventPublisher for NoopPublisher {
    fn publish(&self, _event: DomainEvent) -> usize {
        0
    }
}
