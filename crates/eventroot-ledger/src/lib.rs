//! Eventroot — Ledger bounded context.
//!
//! Event-sourced bank accounts: opening, deposits, withdrawals and
//! statement requests.

pub mod application;
pub mod domain;
