//! Given/when/then harness around a real aggregate root.
//!
//! ```ignore
//! Account::fake()
//!     .given([opened("Ada"), deposited(100)])
//!     .when(|account| account.withdraw(30))
//!     .then(|result| result.is_ok())
//!     .assert_recorded(&[withdrawn(30)]);
//! ```
//!
//! Events passed to [`FakeAggregateRoot::given`] establish prior state and are
//! never visible to the assertions. Every `given` call closes the baseline:
//! whatever the aggregate applied or recorded before it counts as history.
//! The recorded set is the aggregate's uncommitted events since then, the
//! applied set is the aggregate's applied log since then.

use std::fmt::Debug;

use eventroot_core::aggregate::AggregateRoot;
use eventroot_core::event::DomainEvent;
use uuid::Uuid;

use eventroot_core::event::EventPayload;

use crate::assertions::{AssertionOutcome, EventTypes};

/// Test harness wrapping one aggregate of type `A`.
///
/// `R` is the value returned by the last [`when`](Self::when) action.
#[derive(Debug)]
pub struct FakeAggregateRoot<A: AggregateRoot, R = ()> {
    aggregate: A,
    return_value: R,
}

impl<A: AggregateRoot> FakeAggregateRoot<A> {
    /// Wraps a fresh aggregate with a generated identifier.
    #[must_use]
    pub fn fake() -> Self {
        Self::fake_with_id(Uuid::new_v4())
    }

    /// Wraps a fresh aggregate with the identifier `id`.
    #[must_use]
    pub fn fake_with_id(id: Uuid) -> Self {
        let mut aggregate = A::new(id);
        aggregate.state_mut().log_applied();
        Self {
            aggregate,
            return_value: (),
        }
    }
}

impl<A: AggregateRoot, R> FakeAggregateRoot<A, R> {
    /// Applies `events` as prior history, exactly like replay does.
    ///
    /// May be called repeatedly and interleaved with direct calls through
    /// [`aggregate_root_mut`](Self::aggregate_root_mut). Events recorded
    /// before the call are treated as already persisted, so neither set
    /// reports them afterwards.
    #[must_use]
    pub fn given<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = A::Event>,
    {
        for event in events {
            self.aggregate.apply(event);
        }
        self.aggregate.clear_uncommitted_events();
        self.aggregate.state_mut().clear_applied_log();
        self
    }

    /// Runs `action` against the aggregate and captures its return value.
    ///
    /// Panics raised by `action` propagate unchanged. An `Err` returned by
    /// `action` is just the captured value; inspect it with
    /// [`then`](Self::then).
    pub fn when<F, T>(self, action: F) -> FakeAggregateRoot<A, T>
    where
        F: FnOnce(&mut A) -> T,
    {
        let Self { mut aggregate, .. } = self;
        let return_value = action(&mut aggregate);
        FakeAggregateRoot {
            aggregate,
            return_value,
        }
    }

    /// Passes the value captured by `when` to `assertion`.
    ///
    /// # Panics
    ///
    /// Panics if `assertion` returns `false` or an `Err`.
    #[track_caller]
    pub fn then<F, O>(&self, assertion: F) -> &Self
    where
        F: FnOnce(&R) -> O,
        O: AssertionOutcome,
    {
        assertion(&self.return_value).verify("then assertion");
        self
    }

    /// Returns the wrapped aggregate.
    #[must_use]
    pub fn aggregate_root(&self) -> &A {
        &self.aggregate
    }

    /// Returns the wrapped aggregate for direct calls outside `when`.
    pub fn aggregate_root_mut(&mut self) -> &mut A {
        &mut self.aggregate
    }

    /// Unwraps the harness into its aggregate.
    pub fn into_aggregate_root(self) -> A {
        self.aggregate
    }

    /// Returns the value captured by the last `when`.
    #[must_use]
    pub fn return_value(&self) -> &R {
        &self.return_value
    }

    /// Unwraps the harness into the value captured by the last `when`.
    pub fn into_return_value(self) -> R {
        self.return_value
    }

    fn recorded(&self) -> &[A::Event] {
        self.aggregate.uncommitted_events()
    }

    fn applied(&self) -> &[A::Event] {
        self.aggregate.state().applied_log().unwrap_or_default()
    }

    /// Asserts no event was recorded.
    ///
    /// # Panics
    ///
    /// Panics if any event was recorded after the given phase.
    #[track_caller]
    pub fn assert_nothing_recorded(&self) -> &Self {
        assert_none("recorded", self.recorded());
        self
    }

    /// Asserts no event was applied after the given phase.
    ///
    /// # Panics
    ///
    /// Panics if any event was applied after the given phase.
    #[track_caller]
    pub fn assert_nothing_applied(&self) -> &Self {
        assert_none("applied", self.applied());
        self
    }

    /// Asserts the recorded events equal `expected`, in order.
    ///
    /// # Panics
    ///
    /// Panics with both sequences if they differ.
    #[track_caller]
    pub fn assert_recorded(&self, expected: &[A::Event]) -> &Self {
        assert_sequence("recorded", expected, self.recorded());
        self
    }

    /// Calls `check` once per recorded event, in order.
    ///
    /// # Panics
    ///
    /// Panics if nothing was recorded, or if `check` panics, returns `false`
    /// or returns an `Err`.
    #[track_caller]
    pub fn assert_recorded_with<F, O>(&self, check: F) -> &Self
    where
        F: FnMut(&A::Event) -> O,
        O: AssertionOutcome,
    {
        assert_each("recorded", self.recorded(), check);
        self
    }

    /// Asserts the events applied after the given phase equal `expected`,
    /// in order.
    ///
    /// # Panics
    ///
    /// Panics with both sequences if they differ.
    #[track_caller]
    pub fn assert_applied(&self, expected: &[A::Event]) -> &Self {
        assert_sequence("applied", expected, self.applied());
        self
    }

    /// Calls `check` once per event applied after the given phase.
    ///
    /// # Panics
    ///
    /// Panics if nothing was applied, or if `check` panics, returns `false`
    /// or returns an `Err`.
    #[track_caller]
    pub fn assert_applied_with<F, O>(&self, check: F) -> &Self
    where
        F: FnMut(&A::Event) -> O,
        O: AssertionOutcome,
    {
        assert_each("applied", self.applied(), check);
        self
    }

    /// Asserts no recorded event carries payload `P`.
    ///
    /// # Panics
    ///
    /// Panics with the offending events.
    #[track_caller]
    pub fn assert_not_recorded<P>(&self) -> &Self
    where
        P: EventPayload<A::Event>,
    {
        assert_no_type("recorded", &[P::EVENT_TYPE], self.recorded());
        self
    }

    /// Asserts no recorded event carries any payload in the tuple `T`,
    /// e.g. `assert_none_recorded::<(Opened, Closed)>()`.
    ///
    /// # Panics
    ///
    /// Panics with the offending events.
    #[track_caller]
    pub fn assert_none_recorded<T>(&self) -> &Self
    where
        T: EventTypes<A::Event>,
    {
        assert_no_type("recorded", &T::event_types(), self.recorded());
        self
    }

    /// Asserts no event applied after the given phase carries payload `P`.
    ///
    /// # Panics
    ///
    /// Panics with the offending events.
    #[track_caller]
    pub fn assert_not_applied<P>(&self) -> &Self
    where
        P: EventPayload<A::Event>,
    {
        assert_no_type("applied", &[P::EVENT_TYPE], self.applied());
        self
    }

    /// Asserts no event applied after the given phase carries any payload
    /// in the tuple `T`.
    ///
    /// # Panics
    ///
    /// Panics with the offending events.
    #[track_caller]
    pub fn assert_none_applied<T>(&self) -> &Self
    where
        T: EventTypes<A::Event>,
    {
        assert_no_type("applied", &T::event_types(), self.applied());
        self
    }

    /// Asserts `expected` is among the recorded events, at any position.
    ///
    /// # Panics
    ///
    /// Panics with the recorded events if none equals `expected`.
    #[track_caller]
    pub fn assert_event_recorded(&self, expected: &A::Event) -> &Self {
        let recorded = self.recorded();
        assert!(
            recorded.contains(expected),
            "expected event to be recorded: {expected:#?}\nrecorded events: {recorded:#?}"
        );
        self
    }
}

#[track_caller]
fn assert_none<E: Debug>(set: &str, actual: &[E]) {
    assert!(
        actual.is_empty(),
        "expected no {set} events, but {} were {set}: {actual:#?}",
        actual.len()
    );
}

#[track_caller]
fn assert_sequence<E: DomainEvent>(set: &str, expected: &[E], actual: &[E]) {
    assert!(
        expected == actual,
        "{set} events do not match\nexpected: {expected:#?}\nactual: {actual:#?}"
    );
}

#[track_caller]
fn assert_each<E, F, O>(set: &str, actual: &[E], mut check: F)
where
    E: DomainEvent,
    F: FnMut(&E) -> O,
    O: AssertionOutcome,
{
    assert!(!actual.is_empty(), "expected {set} events to check, but none were {set}");
    for (index, event) in actual.iter().enumerate() {
        check(event).verify(&format!("check of {set} event #{index} {event:?}"));
    }
}

#[track_caller]
fn assert_no_type<E: DomainEvent>(set: &str, types: &[&'static str], actual: &[E]) {
    let offending: Vec<&E> = actual
        .iter()
        .filter(|event| types.contains(&event.event_type()))
        .collect();
    assert!(
        offending.is_empty(),
        "expected no {set} events of type {types:?}, but found: {offending:#?}"
    );
}

/// Entry point mirroring `Aggregate::fake()`.
pub trait AggregateRootFake: AggregateRoot {
    /// Wraps a fresh aggregate with a generated identifier in a harness.
    fn fake() -> FakeAggregateRoot<Self> {
        FakeAggregateRoot::fake()
    }

    /// Wraps a fresh aggregate with the identifier `id` in a harness.
    fn fake_with_id(id: Uuid) -> FakeAggregateRoot<Self> {
        FakeAggregateRoot::fake_with_id(id)
    }
}

impl<A: AggregateRoot> AggregateRootFake for A {}
