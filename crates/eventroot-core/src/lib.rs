//! Eventroot Core — the event-sourced aggregate root engine.
//!
//! Aggregates derive their state exclusively from replaying domain events.
//! Mutations are expressed by recording new events, which are applied
//! immediately and buffered until they are persisted. This crate defines the
//! engine and the narrow boundaries it consumes (event store, event type
//! registry, clock). It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod handlers;
pub mod persistence;
pub mod registry;
pub mod repository;

#[cfg(test)]
mod testing;
