//! Commands for the Ledger context.

use eventroot_core::command::Command;
use uuid::Uuid;

/// Command to open a new account.
#[derive(Debug, Clone)]
pub struct OpenAccount {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The account identifier.
    pub account_id: Uuid,
    /// The account holder's name.
    pub owner: String,
}

/// Command to deposit money into an account.
#[derive(Debug, Clone)]
pub struct DepositMoney {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The account identifier.
    pub account_id: Uuid,
    /// The amount in minor units.
    pub amount: u64,
}

/// Command to withdraw money from an account.
#[derive(Debug, Clone)]
pub struct WithdrawMoney {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The account identifier.
    pub account_id: Uuid,
    /// The amount in minor units.
    pub amount: u64,
}

/// Command to request an account statement.
#[derive(Debug, Clone)]
pub struct RequestStatement {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The account identifier.
    pub account_id: Uuid,
}

impl Command for OpenAccount {
    fn command_type(&self) -> &'static str {
        "ledger.open_account"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for DepositMoney {
    fn command_type(&self) -> &'static str {
        "ledger.deposit_money"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for WithdrawMoney {
    fn command_type(&self) -> &'static str {
        "ledger.withdraw_money"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for RequestStatement {
    fn command_type(&self) -> &'static str {
        "ledger.request_statement"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
