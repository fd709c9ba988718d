//! Aggregate roots for the Ledger context.

use std::sync::LazyLock;

use eventroot_core::aggregate::{AggregateRoot, AggregateState};
use eventroot_core::error::DomainError;
use eventroot_core::handlers::EventHandlers;
use uuid::Uuid;

use super::events::{AccountEvent, AccountOpened, MoneyDeposited, MoneyWithdrawn, StatementRequested};

/// The aggregate root for a bank account.
#[derive(Debug)]
pub struct Account {
    state: AggregateState<AccountEvent>,
    /// The account holder, once opened.
    pub(crate) owner: Option<String>,
    /// Current balance in minor units.
    pub(crate) balance: u64,
}

impl Account {
    /// Returns the account holder, if the account has been opened.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Returns the current balance in minor units.
    #[must_use]
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Returns `true` once the account has been opened.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.owner.is_some()
    }

    /// Opens the account for `owner`, producing an `AccountOpened` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the account is already open or
    /// `owner` is blank.
    pub fn open(&mut self, owner: &str) -> Result<(), DomainError> {
        if self.is_open() {
            return Err(DomainError::Validation("account is already open".into()));
        }
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(DomainError::Validation("owner must not be blank".into()));
        }
        self.record_that(AccountEvent::AccountOpened(AccountOpened {
            account_id: self.aggregate_id(),
            owner: owner.to_owned(),
        }));
        Ok(())
    }

    /// Deposits `amount`, producing a `MoneyDeposited` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the account is not open or
    /// `amount` is zero.
    pub fn deposit(&mut self, amount: u64) -> Result<(), DomainError> {
        self.ensure_open()?;
        ensure_positive(amount)?;
        self.record_that(AccountEvent::MoneyDeposited(MoneyDeposited { amount }));
        Ok(())
    }

    /// Withdraws `amount`, producing a `MoneyWithdrawn` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the account is not open, `amount`
    /// is zero, or the balance does not cover it.
    pub fn withdraw(&mut self, amount: u64) -> Result<(), DomainError> {
        self.ensure_open()?;
        ensure_positive(amount)?;
        if amount > self.balance {
            return Err(DomainError::Validation(format!(
                "insufficient funds: balance {}, requested {amount}",
                self.balance
            )));
        }
        self.record_that(AccountEvent::MoneyWithdrawn(MoneyWithdrawn { amount }));
        Ok(())
    }

    /// Requests a statement, producing a `StatementRequested` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the account is not open.
    pub fn request_statement(&mut self) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.record_that(AccountEvent::StatementRequested(StatementRequested {
            account_id: self.aggregate_id(),
        }));
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DomainError::Validation("account is not open".into()))
        }
    }

    fn on_opened(&mut self, event: &AccountOpened) {
        self.owner = Some(event.owner.clone());
    }

    fn on_deposited(&mut self, event: &MoneyDeposited) {
        self.balance += event.amount;
    }

    fn on_withdrawn(&mut self, event: &MoneyWithdrawn) {
        self.balance = self.balance.saturating_sub(event.amount);
    }
}

fn ensure_positive(amount: u64) -> Result<(), DomainError> {
    if amount == 0 {
        return Err(DomainError::Validation("amount must be positive".into()));
    }
    Ok(())
}

impl AggregateRoot for Account {
    type Event = AccountEvent;

    fn new(id: Uuid) -> Self {
        Self {
            state: AggregateState::new(id),
            owner: None,
            balance: 0,
        }
    }

    fn state(&self) -> &AggregateState<AccountEvent> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AggregateState<AccountEvent> {
        &mut self.state
    }

    // StatementRequested has no handler: it changes nothing here.
    fn handlers() -> &'static EventHandlers<Self> {
        static HANDLERS: LazyLock<EventHandlers<Account>> = LazyLock::new(|| {
            EventHandlers::new()
                .on(Account::on_opened)
                .on(Account::on_deposited)
                .on(Account::on_withdrawn)
        });
        &HANDLERS
    }
}
