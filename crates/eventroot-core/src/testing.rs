//! Minimal aggregate used by this crate's unit tests.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{AggregateRoot, AggregateState};
use crate::event::{DomainEvent, EventPayload};
use crate::handlers::EventHandlers;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Added {
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Reset;

/// Emitted but never handled by `Tally`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Noted {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TallyEvent {
    Added(Added),
    Reset(Reset),
    Noted(Noted),
}

impl DomainEvent for TallyEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Added(_) => Added::EVENT_TYPE,
            Self::Reset(_) => Reset::EVENT_TYPE,
            Self::Noted(_) => Noted::EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Added(payload) => serde_json::to_value(payload),
            Self::Reset(payload) => serde_json::to_value(payload),
            Self::Noted(payload) => serde_json::to_value(payload),
        }
    }
}

impl EventPayload<TallyEvent> for Added {
    const EVENT_TYPE: &'static str = "tally.added";

    fn from_event(event: &TallyEvent) -> Option<&Self> {
        match event {
            TallyEvent::Added(payload) => Some(payload),
            _ => None,
        }
    }
}

impl EventPayload<TallyEvent> for Reset {
    const EVENT_TYPE: &'static str = "tally.reset";

    fn from_event(event: &TallyEvent) -> Option<&Self> {
        match event {
            TallyEvent::Reset(payload) => Some(payload),
            _ => None,
        }
    }
}

impl EventPayload<TallyEvent> for Noted {
    const EVENT_TYPE: &'static str = "tally.noted";

    fn from_event(event: &TallyEvent) -> Option<&Self> {
        match event {
            TallyEvent::Noted(payload) => Some(payload),
            _ => None,
        }
    }
}

impl From<Added> for TallyEvent {
    fn from(payload: Added) -> Self {
        Self::Added(payload)
    }
}

impl From<Reset> for TallyEvent {
    fn from(payload: Reset) -> Self {
        Self::Reset(payload)
    }
}

#[derive(Debug)]
pub(crate) struct Tally {
    state: AggregateState<TallyEvent>,
    pub total: i64,
}

impl Tally {
    pub fn add(&mut self, amount: i64) {
        self.record_that(TallyEvent::Added(Added { amount }));
    }

    fn on_added(&mut self, event: &Added) {
        self.total += event.amount;
    }

    fn on_reset(&mut self, _event: &Reset) {
        self.total = 0;
    }
}

impl AggregateRoot for Tally {
    type Event = TallyEvent;

    fn new(id: Uuid) -> Self {
        Self {
            state: AggregateState::new(id),
            total: 0,
        }
    }

    fn state(&self) -> &AggregateState<TallyEvent> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AggregateState<TallyEvent> {
        &mut self.state
    }

    fn handlers() -> &'static EventHandlers<Self> {
        static HANDLERS: LazyLock<EventHandlers<Tally>> = LazyLock::new(|| {
            EventHandlers::new()
                .on(Tally::on_added)
                .on(Tally::on_reset)
        });
        &HANDLERS
    }
}

pub(crate) fn added(amount: i64) -> TallyEvent {
    TallyEvent::Added(Added { amount })
}
