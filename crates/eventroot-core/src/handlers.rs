//! Event handler table used by [`AggregateRoot::apply`].
//!
//! Each aggregate type builds one [`EventHandlers`] table mapping an event
//! type tag to a typed handler, usually inside a `LazyLock` static:
//!
//! ```ignore
//! fn handlers() -> &'static EventHandlers<Self> {
//!     static HANDLERS: LazyLock<EventHandlers<Account>> = LazyLock::new(|| {
//!         EventHandlers::new()
//!             .on(Account::on_opened)
//!             .on(Account::on_deposited)
//!     });
//!     &HANDLERS
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::aggregate::AggregateRoot;
use crate::event::{DomainEvent, EventPayload};

type Handler<A> = Box<dyn Fn(&mut A, &<A as AggregateRoot>::Event) + Send + Sync>;

/// Mapping from event type tag to the handler that mutates aggregate state.
pub struct EventHandlers<A: AggregateRoot> {
    handlers: HashMap<&'static str, Handler<A>>,
}

impl<A: AggregateRoot> EventHandlers<A> {
    /// Creates an empty handler table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` for events carrying payload `P`.
    ///
    /// Handlers mutate the aggregate's own fields only. They must never call
    /// [`AggregateRoot::record_that`], since they also run during replay.
    /// Registering a second handler for the same tag replaces the first.
    #[must_use]
    pub fn on<P>(mut self, handler: fn(&mut A, &P)) -> Self
    where
        P: EventPayload<A::Event> + 'static,
    {
        self.handlers.insert(
            P::EVENT_TYPE,
            Box::new(move |aggregate: &mut A, event: &A::Event| {
                if let Some(payload) = P::from_event(event) {
                    handler(aggregate, payload);
                }
            }),
        );
        self
    }

    /// Returns `true` if a handler is registered for `event_type`.
    #[must_use]
    pub fn handles(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Runs the handler registered for `event`'s type.
    ///
    /// Returns `false` when no handler is registered; the event is then
    /// ignored, which keeps older aggregates loadable after new event types
    /// are introduced.
    pub fn dispatch(&self, aggregate: &mut A, event: &A::Event) -> bool {
        match self.handlers.get(event.event_type()) {
            Some(handler) => {
                handler(aggregate, event);
                true
            }
            None => false,
        }
    }
}

impl<A: AggregateRoot> Default for EventHandlers<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AggregateRoot> fmt::Debug for EventHandlers<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.handlers.keys().collect();
        tags.sort();
        f.debug_struct("EventHandlers").field("tags", &tags).finish()
    }
}
