//! Command handlers for the Ledger context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: retrieve aggregate, execute command, persist
//! events.

use eventroot_core::aggregate::AggregateRoot;
use eventroot_core::clock::Clock;
use eventroot_core::command::Command;
use eventroot_core::error::DomainError;
use eventroot_core::persistence::AggregatePersistence;
use eventroot_core::repository::{EventRepository, StoredEvent};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::aggregates::Account;
use crate::domain::commands::{DepositMoney, OpenAccount, RequestStatement, WithdrawMoney};
use crate::domain::events::event_registry;

/// Retrieves an account that must already have been opened.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the stream is empty, or any
/// retrieval error.
async fn retrieve_existing(
    account_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<Account, DomainError> {
    let account = Account::retrieve(account_id, repo, event_registry()).await?;
    if account.version() == 0 {
        return Err(DomainError::AggregateNotFound(account_id));
    }
    Ok(account)
}

/// Handles the `OpenAccount` command: retrieves the aggregate, opens it, and
/// persists the resulting events.
///
/// # Errors
///
/// Returns `DomainError` if the account is already open, the owner is
/// blank, or event loading or appending fails.
#[instrument(
    skip_all,
    fields(account_id = %command.account_id, command = command.command_type(), correlation_id = %command.correlation_id())
)]
pub async fn handle_open_account(
    command: &OpenAccount,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let mut account = Account::retrieve(command.account_id, repo, event_registry()).await?;

    account.open(&command.owner)?;

    let stored_events = account.persist(repo, clock).await?;
    info!(events = stored_events.len(), "account opened");
    Ok(stored_events)
}

/// Handles the `DepositMoney` command: retrieves the aggregate, deposits the
/// amount, and persists the resulting events.
///
/// # Errors
///
/// Returns `DomainError` if the account does not exist, the deposit is
/// rejected, or event loading or appending fails.
#[instrument(
    skip_all,
    fields(account_id = %command.account_id, command = command.command_type(), correlation_id = %command.correlation_id())
)]
pub async fn handle_deposit_money(
    command: &DepositMoney,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let mut account = retrieve_existing(command.account_id, repo).await?;

    account.deposit(command.amount)?;

    let stored_events = account.persist(repo, clock).await?;
    info!(balance = account.balance(), "money deposited");
    Ok(stored_events)
}

/// Handles the `WithdrawMoney` command: retrieves the aggregate, withdraws
/// the amount, and persists the resulting events.
///
/// # Errors
///
/// Returns `DomainError` if the account does not exist, funds are
/// insufficient, or event loading or appending fails.
#[instrument(
    skip_all,
    fields(account_id = %command.account_id, command = command.command_type(), correlation_id = %command.correlation_id())
)]
pub async fn handle_withdraw_money(
    command: &WithdrawMoney,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let mut account = retrieve_existing(command.account_id, repo).await?;

    account.withdraw(command.amount)?;

    let stored_events = account.persist(repo, clock).await?;
    info!(balance = account.balance(), "money withdrawn");
    Ok(stored_events)
}

/// Handles the `RequestStatement` command: retrieves the aggregate, records
/// the request, and persists the resulting events.
///
/// # Errors
///
/// Returns `DomainError` if the account does not exist or event loading or
/// appending fails.
#[instrument(
    skip_all,
    fields(account_id = %command.account_id, command = command.command_type(), correlation_id = %command.correlation_id())
)]
pub async fn handle_request_statement(
    command: &RequestStatement,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let mut account = retrieve_existing(command.account_id, repo).await?;

    account.request_statement()?;

    let stored_events = account.persist(repo, clock).await?;
    info!("statement requested");
    Ok(stored_events)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use eventroot_core::error::DomainError;
    use uuid::Uuid;

    use super::*;
    use eventroot_test_support::{
        EmptyEventRepository, FailingEventRepository, FixedClock, InMemoryEventRepository,
        RecordingEventRepository, init_tracing,
    };

    fn open_command(account_id: Uuid) -> OpenAccount {
        OpenAccount {
            correlation_id: Uuid::new_v4(),
            account_id,
            owner: "Ada".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_handle_open_account_persists_account_opened_event() {
        // Arrange
        init_tracing();
        let account_id = Uuid::new_v4();
        let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = FixedClock(fixed_now);
        let repo = RecordingEventRepository::new(Vec::new());

        // Act
        let result = handle_open_account(&open_command(account_id), &clock, &repo).await;

        // Assert
        assert!(result.is_ok());

        let appended = repo.appended_events();
        assert_eq!(appended.len(), 1);

        let (agg_id, expected_version, events) = &appended[0];
        assert_eq!(*agg_id, account_id);
        assert_eq!(*expected_version, 0);
        assert_eq!(events.len(), 1);

        let stored = &events[0];
        assert_eq!(stored.event_type, "ledger.account_opened");
        assert_eq!(stored.aggregate_id, account_id);
        assert_eq!(stored.sequence_number, 1);
        assert_eq!(stored.occurred_at, fixed_now);
        assert_eq!(
            stored.payload,
            serde_json::json!({ "account_id": account_id, "owner": "Ada" })
        );
    }

    #[tokio::test]
    async fn test_full_account_lifecycle_against_in_memory_store() {
        // Arrange
        let account_id = Uuid::new_v4();
        let clock = FixedClock::default();
        let repo = InMemoryEventRepository::new();

        // Act
        handle_open_account(&open_command(account_id), &clock, &repo)
            .await
            .unwrap();
        handle_deposit_money(
            &DepositMoney {
                correlation_id: Uuid::new_v4(),
                account_id,
                amount: 120,
            },
            &clock,
            &repo,
        )
        .await
        .unwrap();
        handle_withdraw_money(
            &WithdrawMoney {
                correlation_id: Uuid::new_v4(),
                account_id,
                amount: 20,
            },
            &clock,
            &repo,
        )
        .await
        .unwrap();
        handle_request_statement(
            &RequestStatement {
                correlation_id: Uuid::new_v4(),
                account_id,
            },
            &clock,
            &repo,
        )
        .await
        .unwrap();

        // Assert
        let stream = repo.stream(account_id);
        let tags: Vec<&str> = stream.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(
            tags,
            vec![
                "ledger.account_opened",
                "ledger.money_deposited",
                "ledger.money_withdrawn",
                "ledger.statement_requested",
            ]
        );

        let account = Account::retrieve(account_id, &repo, event_registry())
            .await
            .unwrap();
        assert_eq!(account.balance(), 100);
        assert_eq!(account.version(), 4);
    }

    #[tokio::test]
    async fn test_handle_deposit_money_on_missing_account_returns_not_found() {
        let account_id = Uuid::new_v4();
        let command = DepositMoney {
            correlation_id: Uuid::new_v4(),
            account_id,
            amount: 10,
        };

        let result = handle_deposit_money(&command, &FixedClock::default(), &EmptyEventRepository).await;

        assert!(matches!(result, Err(DomainError::AggregateNotFound(id)) if id == account_id));
    }

    #[tokio::test]
    async fn test_handle_withdraw_money_rejects_overdraft_without_appending() {
        // Arrange
        let account_id = Uuid::new_v4();
        let clock = FixedClock::default();
        let repo = InMemoryEventRepository::new();
        handle_open_account(&open_command(account_id), &clock, &repo)
            .await
            .unwrap();
        let command = WithdrawMoney {
            correlation_id: Uuid::new_v4(),
            account_id,
            amount: 1,
        };

        // Act
        let result = handle_withdraw_money(&command, &clock, &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(repo.stream(account_id).len(), 1);
    }

    #[tokio::test]
    async fn test_handle_open_account_propagates_repository_failure() {
        let result = handle_open_account(
            &open_command(Uuid::new_v4()),
            &FixedClock::default(),
            &FailingEventRepository,
        )
        .await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_handle_open_account_twice_is_rejected() {
        let account_id = Uuid::new_v4();
        let clock = FixedClock::default();
        let repo = InMemoryEventRepository::new();
        handle_open_account(&open_command(account_id), &clock, &repo)
            .await
            .unwrap();

        let result = handle_open_account(&open_command(account_id), &clock, &repo).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
