//! Domain event abstractions.

use std::fmt::Debug;

/// Trait that all domain events implement.
///
/// Events are immutable values. Equality is structural: two independently
/// built events of the same type with equal fields compare equal, which is
/// what the test harness relies on when asserting recorded events. Implement
/// it on an enum with one variant per event type and derive `PartialEq`.
pub trait DomainEvent: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Returns the event type tag (used for dispatch and serialization routing).
    fn event_type(&self) -> &'static str;

    /// Serializes the payload of this event to JSON.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the payload cannot be represented as JSON.
    fn to_payload(&self) -> Result<serde_json::Value, serde_json::Error>;
}

/// A concrete payload carried by one variant of an event enum.
///
/// The payload type is the unit handlers are registered for and the unit the
/// [`EventRegistry`](crate::registry::EventRegistry) decodes stored events into.
pub trait EventPayload<E: DomainEvent>: Sized {
    /// Tag under which this payload is dispatched and stored.
    const EVENT_TYPE: &'static str;

    /// Borrows the payload out of `event` when `event` carries this type.
    fn from_event(event: &E) -> Option<&Self>;
}
