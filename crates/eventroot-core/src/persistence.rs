//! Loading aggregates from, and persisting them to, an [`EventRepository`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::aggregate::AggregateRoot;
use crate::clock::Clock;
use crate::error::DomainError;
use crate::event::DomainEvent;
use crate::registry::EventRegistry;
use crate::repository::{EventRepository, StoredEvent};

/// Retrieval and persistence for every [`AggregateRoot`].
#[async_trait]
pub trait AggregatePersistence: AggregateRoot {
    /// Loads the stream for `id` and reconstitutes the aggregate from it.
    ///
    /// An empty stream yields a fresh aggregate at version 0. Stored events
    /// with a tag `registry` does not know advance the version without
    /// touching state, so the version keeps matching the stream head.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if loading fails or a known payload cannot be
    /// deserialized.
    async fn retrieve(
        id: Uuid,
        repo: &dyn EventRepository,
        registry: &EventRegistry<Self::Event>,
    ) -> Result<Self, DomainError>;

    /// Hands the uncommitted events to `repo` and clears them on success.
    ///
    /// Returns the stored form of the appended events. On failure the
    /// uncommitted events are left in place so the caller may retry or
    /// discard them.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ConcurrencyConflict` if the stream moved past
    /// [`AggregateRoot::committed_version`], or any other repository or
    /// serialization error.
    async fn persist(
        &mut self,
        repo: &dyn EventRepository,
        clock: &dyn Clock,
    ) -> Result<Vec<StoredEvent>, DomainError>;
}

#[async_trait]
impl<A: AggregateRoot> AggregatePersistence for A {
    async fn retrieve(
        id: Uuid,
        repo: &dyn EventRepository,
        registry: &EventRegistry<Self::Event>,
    ) -> Result<Self, DomainError> {
        let stored_events = repo.load_events(id).await?;
        let mut aggregate = Self::new(id);
        for stored in &stored_events {
            match registry.materialize(stored)? {
                Some(event) => aggregate.apply(event),
                None => aggregate.state_mut().skip_unknown(),
            }
        }
        tracing::debug!(
            aggregate_id = %id,
            version = aggregate.version(),
            "aggregate retrieved"
        );
        Ok(aggregate)
    }

    async fn persist(
        &mut self,
        repo: &dyn EventRepository,
        clock: &dyn Clock,
    ) -> Result<Vec<StoredEvent>, DomainError> {
        if self.uncommitted_events().is_empty() {
            return Ok(Vec::new());
        }

        let aggregate_id = self.aggregate_id();
        let expected_version = self.committed_version();
        let occurred_at = clock.now();
        let stored_events = self
            .uncommitted_events()
            .iter()
            .zip(expected_version + 1..)
            .map(|(event, sequence_number)| -> Result<StoredEvent, DomainError> {
                Ok(StoredEvent {
                    event_id: Uuid::new_v4(),
                    aggregate_id,
                    event_type: event.event_type().to_owned(),
                    payload: event.to_payload().map_err(|e| {
                        DomainError::Infrastructure(format!("event serialization failed: {e}"))
                    })?,
                    sequence_number,
                    occurred_at,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Err(error) = repo
            .append_events(aggregate_id, expected_version, &stored_events)
            .await
        {
            if error.is_concurrency_conflict() {
                tracing::warn!(%aggregate_id, expected_version, %error, "persist rejected");
            }
            return Err(error);
        }

        self.clear_uncommitted_events();
        tracing::debug!(
            %aggregate_id,
            expected_version,
            count = stored_events.len(),
            "events persisted"
        );
        Ok(stored_events)
    }
}
