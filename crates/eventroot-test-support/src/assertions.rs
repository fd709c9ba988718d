//! Building blocks for the harness' assertion methods.

use std::fmt::Debug;

use eventroot_core::event::{DomainEvent, EventPayload};

/// What an assertion callback may return.
///
/// `()` means the callback did its own checking, `false` and `Err` fail the
/// scenario.
pub trait AssertionOutcome {
    /// Panics if this outcome represents a failed assertion.
    fn verify(self, context: &str);
}

impl AssertionOutcome for () {
    fn verify(self, _context: &str) {}
}

impl AssertionOutcome for bool {
    #[track_caller]
    fn verify(self, context: &str) {
        assert!(self, "{context} returned false");
    }
}

impl<E: Debug> AssertionOutcome for Result<(), E> {
    #[track_caller]
    fn verify(self, context: &str) {
        if let Err(error) = self {
            panic!("{context} returned an error: {error:?}");
        }
    }
}

/// A set of event payload types, written as a tuple of one to four
/// [`EventPayload`] types.
pub trait EventTypes<E: DomainEvent> {
    /// Returns the tags of the payload types in this set.
    fn event_types() -> Vec<&'static str>;
}

macro_rules! tuple_event_types {
    ($($payload:ident),+) => {
        impl<E: DomainEvent, $($payload: EventPayload<E>),+> EventTypes<E> for ($($payload,)+) {
            fn event_types() -> Vec<&'static str> {
                vec![$(<$payload as EventPayload<E>>::EVENT_TYPE),+]
            }
        }
    };
}

tuple_event_types!(P1);
tuple_event_types!(P1, P2);
tuple_event_types!(P1, P2, P3);
tuple_event_types!(P1, P2, P3, P4);
