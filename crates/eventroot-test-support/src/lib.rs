//! Test harness and test doubles for eventroot aggregates.
//!
//! [`FakeAggregateRoot`] runs given/when/then scenarios against a real
//! aggregate; the repositories and [`FixedClock`] stand in for the event
//! store and system time.

mod assertions;
mod clock;
mod fake;
mod logging;
mod repository;

pub use assertions::{AssertionOutcome, EventTypes};
pub use clock::FixedClock;
pub use fake::{AggregateRootFake, FakeAggregateRoot};
pub use repository::{
    EmptyEventRepository, FailingEventRepository, InMemoryEventRepository,
    RecordingEventRepository,
};
pub use logging::init_tracing;
