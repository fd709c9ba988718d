//! Aggregate root abstraction.
//!
//! An aggregate's state is derived solely from the events applied to it.
//! [`AggregateRoot::record_that`] is the only way to change an aggregate: the
//! event is buffered as uncommitted and applied immediately. Replaying
//! history goes through [`AggregateRoot::apply`], which mutates state without
//! recording anything.

use uuid::Uuid;

use crate::event::DomainEvent;
use crate::handlers::EventHandlers;

/// Event-sourcing bookkeeping embedded in every aggregate root.
///
/// Invariant: `version` equals the number of events ever applied to this
/// instance, whether replayed or recorded, persisted or not.
///
/// Applied events are only kept when a log has been switched on with
/// [`AggregateState::log_applied`]; aggregates never do this themselves.
#[derive(Debug, Clone)]
pub struct AggregateState<E> {
    id: Uuid,
    version: i64,
    uncommitted_events: Vec<E>,
    applied_log: Option<Vec<E>>,
}

impl<E> AggregateState<E> {
    /// Creates empty bookkeeping for the aggregate `id`, at version 0.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            uncommitted_events: Vec::new(),
            applied_log: None,
        }
    }

    /// Starts keeping every event applied from now on. Idempotent.
    pub fn log_applied(&mut self) {
        self.applied_log.get_or_insert_with(Vec::new);
    }

    /// Returns the events applied since [`log_applied`](Self::log_applied)
    /// was called, or `None` if no log is kept.
    #[must_use]
    pub fn applied_log(&self) -> Option<&[E]> {
        self.applied_log.as_deref()
    }

    /// Empties the applied log, if one is kept.
    pub fn clear_applied_log(&mut self) {
        if let Some(log) = &mut self.applied_log {
            log.clear();
        }
    }

    /// Counts a stored event that could not be materialized. The stream head
    /// moves, the state does not.
    pub(crate) fn skip_unknown(&mut self) {
        self.version += 1;
    }
}

/// Trait for aggregate roots that reconstitute from event history.
///
/// Implementors embed an [`AggregateState`] and declare their handler table;
/// recording, applying and replay are provided.
pub trait AggregateRoot: Sized + Send + Sync + 'static {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Creates an empty aggregate at version 0.
    fn new(id: Uuid) -> Self;

    /// Returns the embedded event-sourcing bookkeeping.
    fn state(&self) -> &AggregateState<Self::Event>;

    /// Returns the embedded event-sourcing bookkeeping, mutably.
    fn state_mut(&mut self) -> &mut AggregateState<Self::Event>;

    /// Returns the handler table for this aggregate type, built once.
    fn handlers() -> &'static EventHandlers<Self>;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid {
        self.state().id
    }

    /// Returns the current version (number of events applied).
    fn version(&self) -> i64 {
        self.state().version
    }

    /// Returns the version the event store is expected to be at, i.e. the
    /// current version minus the events not yet persisted.
    #[allow(clippy::cast_possible_wrap)]
    fn committed_version(&self) -> i64 {
        self.version() - self.state().uncommitted_events.len() as i64
    }

    /// Records a new event: buffers it as uncommitted, then applies it.
    fn record_that(&mut self, event: Self::Event) {
        self.state_mut().uncommitted_events.push(event.clone());
        self.apply(event);
    }

    /// Applies an event to mutate internal state without recording it.
    ///
    /// Events without a registered handler are tolerated: state is left
    /// alone but the version still advances.
    fn apply(&mut self, event: Self::Event) {
        if !Self::handlers().dispatch(self, &event) {
            tracing::trace!(
                aggregate_id = %self.aggregate_id(),
                event_type = event.event_type(),
                "no handler registered, event ignored"
            );
        }
        let state = self.state_mut();
        state.version += 1;
        if let Some(log) = &mut state.applied_log {
            log.push(event);
        }
    }

    /// Returns the events recorded since the last successful persist.
    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.state().uncommitted_events
    }

    /// Clears uncommitted events after persistence. The version is kept.
    fn clear_uncommitted_events(&mut self) {
        self.state_mut().uncommitted_events.clear();
    }

    /// Rebuilds an aggregate by applying `events` in order.
    ///
    /// Nothing is recorded: the result has no uncommitted events and its
    /// version equals the number of events replayed.
    fn reconstitute_from_events<I>(id: Uuid, events: I) -> Self
    where
        I: IntoIterator<Item = Self::Event>,
    {
        let mut aggregate = Self::new(id);
        for event in events {
            aggregate.apply(event);
        }
        aggregate
    }
}
