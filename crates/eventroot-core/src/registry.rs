//! Event type registry: turns stored events back into concrete events.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::DomainError;
use crate::event::{DomainEvent, EventPayload};
use crate::repository::StoredEvent;

type Decoder<E> = fn(serde_json::Value) -> Result<E, serde_json::Error>;

fn decode<E, P>(payload: serde_json::Value) -> Result<E, serde_json::Error>
where
    E: DomainEvent,
    P: EventPayload<E> + DeserializeOwned + Into<E>,
{
    serde_json::from_value::<P>(payload).map(Into::into)
}

/// Mapping from a stored event type tag to a decoder for that payload.
pub struct EventRegistry<E> {
    decoders: HashMap<&'static str, Decoder<E>>,
}

impl<E: DomainEvent> EventRegistry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Registers payload type `P` under its [`EventPayload::EVENT_TYPE`] tag.
    #[must_use]
    pub fn register<P>(mut self) -> Self
    where
        P: EventPayload<E> + DeserializeOwned + Into<E>,
    {
        self.decoders.insert(P::EVENT_TYPE, decode::<E, P>);
        self
    }

    /// Returns `true` if `event_type` has a registered decoder.
    #[must_use]
    pub fn is_registered(&self, event_type: &str) -> bool {
        self.decoders.contains_key(event_type)
    }

    /// Materializes a stored event into a concrete event.
    ///
    /// Returns `Ok(None)` for tags this registry does not know, so streams
    /// written by newer code can still be replayed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a known payload fails to
    /// deserialize.
    pub fn materialize(&self, stored: &StoredEvent) -> Result<Option<E>, DomainError> {
        let Some(decoder) = self.decoders.get(stored.event_type.as_str()) else {
            tracing::debug!(
                aggregate_id = %stored.aggregate_id,
                event_type = %stored.event_type,
                sequence_number = stored.sequence_number,
                "unknown event type, skipping"
            );
            return Ok(None);
        };
        decoder(stored.payload.clone()).map(Some).map_err(|e| {
            DomainError::Infrastructure(format!(
                "event deserialization failed for {}: {e}",
                stored.event_type
            ))
        })
    }
}

impl<E: DomainEvent> Default for EventRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.decoders.keys().collect();
        tags.sort();
        f.debug_struct("EventRegistry").field("tags", &tags).finish()
    }
}
