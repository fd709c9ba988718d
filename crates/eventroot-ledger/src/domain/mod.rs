//! Domain model for the Ledger context.

pub mod aggregates;
pub mod commands;
pub mod events;
