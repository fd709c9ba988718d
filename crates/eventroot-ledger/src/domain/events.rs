//! Domain events for the Ledger context.

use std::sync::LazyLock;

use eventroot_core::event::{DomainEvent, EventPayload};
use eventroot_core::registry::EventRegistry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted when an account is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOpened {
    /// The account identifier.
    pub account_id: Uuid,
    /// The account holder's name.
    pub owner: String,
}

/// Emitted when money is deposited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyDeposited {
    /// The amount in minor units.
    pub amount: u64,
}

/// Emitted when money is withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyWithdrawn {
    /// The amount in minor units.
    pub amount: u64,
}

/// Emitted when the holder asks for a statement. Consumed by downstream
/// projections; the account itself keeps no state for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRequested {
    /// The account identifier.
    pub account_id: Uuid,
}

/// Domain events for the Ledger context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEvent {
    /// An account has been opened.
    AccountOpened(AccountOpened),
    /// Money has been deposited.
    MoneyDeposited(MoneyDeposited),
    /// Money has been withdrawn.
    MoneyWithdrawn(MoneyWithdrawn),
    /// A statement has been requested.
    StatementRequested(StatementRequested),
}

impl DomainEvent for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::AccountOpened(_) => AccountOpened::EVENT_TYPE,
            Self::MoneyDeposited(_) => MoneyDeposited::EVENT_TYPE,
            Self::MoneyWithdrawn(_) => MoneyWithdrawn::EVENT_TYPE,
            Self::StatementRequested(_) => StatementRequested::EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::AccountOpened(payload) => serde_json::to_value(payload),
            Self::MoneyDeposited(payload) => serde_json::to_value(payload),
            Self::MoneyWithdrawn(payload) => serde_json::to_value(payload),
            Self::StatementRequested(payload) => serde_json::to_value(payload),
        }
    }
}

macro_rules! account_payload {
    ($payload:ident, $tag:literal) => {
        impl EventPayload<AccountEvent> for $payload {
            const EVENT_TYPE: &'static str = $tag;

            fn from_event(event: &AccountEvent) -> Option<&Self> {
                match event {
                    AccountEvent::$payload(payload) => Some(payload),
                    _ => None,
                }
            }
        }

        impl From<$payload> for AccountEvent {
            fn from(payload: $payload) -> Self {
                Self::$payload(payload)
            }
        }
    };
}

account_payload!(AccountOpened, "ledger.account_opened");
account_payload!(MoneyDeposited, "ledger.money_deposited");
account_payload!(MoneyWithdrawn, "ledger.money_withdrawn");
account_payload!(StatementRequested, "ledger.statement_requested");

/// Returns the registry used to materialize stored account events.
pub fn event_registry() -> &'static EventRegistry<AccountEvent> {
    static REGISTRY: LazyLock<EventRegistry<AccountEvent>> = LazyLock::new(|| {
        EventRegistry::new()
            .register::<AccountOpened>()
            .register::<MoneyDeposited>()
            .register::<MoneyWithdrawn>()
            .register::<StatementRequested>()
    });
    &REGISTRY
}
