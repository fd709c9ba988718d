//! Dummy aggregate shared by the harness and persistence tests.
#![allow(dead_code)]

use std::sync::LazyLock;

use eventroot_core::aggregate::{AggregateRoot, AggregateState};
use eventroot_core::event::{DomainEvent, EventPayload};
use eventroot_core::handlers::EventHandlers;
use eventroot_core::registry::EventRegistry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Carries the integer the aggregate last saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DummyEvent {
    pub integer: i64,
}

/// Recorded by the aggregate but never handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DummyNoted {
    pub note: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DummyAggregateEvent {
    Dummy(DummyEvent),
    Noted(DummyNoted),
}

impl DomainEvent for DummyAggregateEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Dummy(_) => DummyEvent::EVENT_TYPE,
            Self::Noted(_) => DummyNoted::EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Dummy(payload) => serde_json::to_value(payload),
            Self::Noted(payload) => serde_json::to_value(payload),
        }
    }
}

impl EventPayload<DummyAggregateEvent> for DummyEvent {
    const EVENT_TYPE: &'static str = "dummy.dummy_event";

    fn from_event(event: &DummyAggregateEvent) -> Option<&Self> {
        match event {
            DummyAggregateEvent::Dummy(payload) => Some(payload),
            DummyAggregateEvent::Noted(_) => None,
        }
    }
}

impl EventPayload<DummyAggregateEvent> for DummyNoted {
    const EVENT_TYPE: &'static str = "dummy.noted";

    fn from_event(event: &DummyAggregateEvent) -> Option<&Self> {
        match event {
            DummyAggregateEvent::Noted(payload) => Some(payload),
            DummyAggregateEvent::Dummy(_) => None,
        }
    }
}

impl From<DummyEvent> for DummyAggregateEvent {
    fn from(payload: DummyEvent) -> Self {
        Self::Dummy(payload)
    }
}

impl From<DummyNoted> for DummyAggregateEvent {
    fn from(payload: DummyNoted) -> Self {
        Self::Noted(payload)
    }
}

#[derive(Debug)]
pub struct DummyAggregateRoot {
    state: AggregateState<DummyAggregateEvent>,
    latest_integer: i64,
}

impl DummyAggregateRoot {
    /// Records a `DummyEvent` one above the latest integer.
    pub fn dummy(&mut self) {
        let integer = self.latest_integer + 1;
        self.record_that(dummy_event(integer));
    }

    pub fn note(&mut self, note: &str) {
        self.record_that(DummyAggregateEvent::Noted(DummyNoted {
            note: note.to_owned(),
        }));
    }

    pub fn latest_integer(&self) -> i64 {
        self.latest_integer
    }

    fn on_dummy_event(&mut self, event: &DummyEvent) {
        self.latest_integer = event.integer;
    }
}

impl AggregateRoot for DummyAggregateRoot {
    type Event = DummyAggregateEvent;

    fn new(id: Uuid) -> Self {
        Self {
            state: AggregateState::new(id),
            latest_integer: 0,
        }
    }

    fn state(&self) -> &AggregateState<DummyAggregateEvent> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AggregateState<DummyAggregateEvent> {
        &mut self.state
    }

    fn handlers() -> &'static EventHandlers<Self> {
        static HANDLERS: LazyLock<EventHandlers<DummyAggregateRoot>> =
            LazyLock::new(|| EventHandlers::new().on(DummyAggregateRoot::on_dummy_event));
        &HANDLERS
    }
}

pub fn dummy_event(integer: i64) -> DummyAggregateEvent {
    DummyAggregateEvent::Dummy(DummyEvent { integer })
}

pub fn registry() -> EventRegistry<DummyAggregateEvent> {
    EventRegistry::new()
        .register::<DummyEvent>()
        .register::<DummyNoted>()
}
