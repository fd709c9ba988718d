//! Application services for the Ledger context.

pub mod command_handlers;
